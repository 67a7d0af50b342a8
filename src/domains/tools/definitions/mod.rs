//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod greeting;
pub mod page_title_seo;
pub mod todays_date;

pub use greeting::{Greeting, GreetingTool};
pub use page_title_seo::{PageTitleReport, PageTitleSeoTool};
pub use todays_date::{TodaysDate, TodaysDateTool};
