pub mod cog;
pub mod leonardo;
