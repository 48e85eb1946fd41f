pub mod receiver_dataset;
pub mod receiver_tables;

pub use receiver_dataset::{Receiver, ReceiverDataset};
pub use receiver_tables::ReceiverTable;
