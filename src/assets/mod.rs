pub mod directory;
pub mod sniff;
pub mod traits;

pub use directory::DirectoryAssetSink;
pub use sniff::ImageFormat;
pub use traits::AssetSink;
