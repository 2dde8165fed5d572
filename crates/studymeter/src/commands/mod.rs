pub mod badges;
pub mod version;
pub mod watchtime;
