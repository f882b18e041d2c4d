pub mod upload;

pub use upload::VideoUploadService;
