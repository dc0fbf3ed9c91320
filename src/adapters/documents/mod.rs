//! Document adapters. Implement BriefWriterPort.

pub mod markdown_brief;

pub use markdown_brief::MarkdownBriefWriter;
