//! Contact form pipeline: field validation, then one POST per submission.
//! `session::ContactSession` drives the idle/submitting/success/failed cycle for one form;
//! `desk::ContactDesk` keeps the open ones.

pub mod desk;
pub mod form;
pub mod handlers;
pub mod session;
