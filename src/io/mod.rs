pub mod archive;
pub mod corpus;
pub mod publish;
