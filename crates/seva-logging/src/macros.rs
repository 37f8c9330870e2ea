//! ---
//! seva_section: "03-logging"
//! seva_subsection: "module"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Structured logging context, macros, and auth event helpers."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
/// Emit an informational log enriched with portal context.
#[macro_export]
macro_rules! seva_info {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::INFO,
            account = ctx.account.unwrap_or(""),
            role_view = ctx.role_view.unwrap_or(""),
            session = ctx.session.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {{
        let ctx = &$crate::LogContext::default();
        tracing::event!(
            tracing::Level::INFO,
            account = ctx.account.unwrap_or(""),
            role_view = ctx.role_view.unwrap_or(""),
            session = ctx.session.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit a debug log enriched with portal context.
#[macro_export]
macro_rules! seva_debug {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::DEBUG,
            account = ctx.account.unwrap_or(""),
            role_view = ctx.role_view.unwrap_or(""),
            session = ctx.session.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {{
        let ctx = &$crate::LogContext::default();
        tracing::event!(
            tracing::Level::DEBUG,
            account = ctx.account.unwrap_or(""),
            role_view = ctx.role_view.unwrap_or(""),
            session = ctx.session.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
}

/// Emit a warning log enriched with portal context.
#[macro_export]
macro_rules! seva_warn {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::WARN,
            account = ctx.account.unwrap_or(""),
            role_view = ctx.role_view.unwrap_or(""),
            session = ctx.session.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {{
        let ctx = &$crate::LogContext::default();
        tracing::event!(
            tracing::Level::WARN,
            account = ctx.account.unwrap_or(""),
            role_view = ctx.role_view.unwrap_or(""),
            session = ctx.session.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
}
