pub mod ocr_tool;

pub use ocr_tool::OcrTool;
