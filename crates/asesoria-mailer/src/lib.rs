//! # asesoria-mailer
//!
//! Outbound transactional email over SMTP.
//!
//! Delivery is best-effort by design: record creation must never fail or
//! stall because the mail relay is slow, so callers use [`Mailer::spawn_send`]
//! which dispatches off the request path with its own timeout and only logs
//! failures.

mod mailer;
mod templates;

pub use mailer::{Mailer, MailerError, SmtpConfig, TlsMode, SEND_TIMEOUT};
pub use templates::{render_email, EmailTemplate};
