//! Results workbook and its email delivery.

pub mod mailer;
pub mod writer;
