#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use og_directory as directory;
pub use og_serial as serial;
pub use og_utils as utils;
