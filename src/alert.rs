//! Alert fragments for showing error messages to users.
//!
//! Alerts render into the fixed `#alert-container` that [crate::html::base]
//! puts on every page. Forms point `hx-target-error` at that container so
//! error fragments land there, and the fragment itself unhides the container
//! and wires up its dismiss button.

use maud::{Markup, PreEscaped, html};

/// A dismissable error alert message.
pub struct Alert<'a> {
    message: &'a str,
    details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    /// Render the alert along with the script that reveals the container.
    pub fn into_markup(self) -> Markup {
        html! {
            div
                class="flex items-start p-4 rounded shadow text-red-800 bg-red-50
                    dark:bg-gray-800 dark:text-red-400"
                role="alert"
            {
                div class="flex-1 text-sm"
                {
                    span class="font-semibold" { (self.message) }

                    @if !self.details.is_empty()
                    {
                        p class="mt-1" { (self.details) }
                    }
                }

                button
                    type="button"
                    class="ms-2 -my-1 p-1 text-lg leading-none bg-transparent cursor-pointer"
                    aria-label="Close"
                    onclick="document.getElementById('alert-container').classList.add('hidden')"
                {
                    "\u{00d7}"
                }
            }

            script
            {
                (PreEscaped("document.getElementById('alert-container').classList.remove('hidden');"))
            }
        }
    }
}
