pub mod export_csv;
pub mod profile;
pub mod profiles;
pub mod sets;

pub use export_csv::{export_monsters_csv, export_runes_csv, ExportError};
pub use profile::{load_profile, Profile, ProfileError};
pub use profiles::{find_profiles, ProfileListing};
