pub mod serializer;
pub mod xtream;
