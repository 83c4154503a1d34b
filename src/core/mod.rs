pub mod uid;

pub use uid::{RandomUids, SequentialUids, Uid, UidGenerator};
