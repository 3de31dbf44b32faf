pub mod acl;
pub mod claims_extractor;
