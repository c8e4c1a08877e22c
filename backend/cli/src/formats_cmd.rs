//! CLI Formats Command

use markread_tools::OcrTool;

pub fn run() {
    println!("Supported image formats:");
    for format in OcrTool::supported_formats() {
        println!("  {format}");
    }
}
