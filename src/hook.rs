use std::sync::Arc;

use crate::error::Result;
use crate::field::Field;
use crate::writer::Writer;

/// What a [`Hook`] decided to do with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookAction {
    /// Pass the (possibly modified) record on to the next hook or writer.
    Forward,
    /// Stop here. Nothing is written and no error is reported.
    Drop,
}

/// Interceptor that runs before a record reaches its writer.
///
/// A hook may inspect the field list, rewrite it in place, or drop the
/// record altogether. [`Level`](crate::Level) is the built-in hook; closures
/// of the right shape are hooks too:
///
/// ```
/// # use field_logger::{Field, HookAction};
/// let redact = |fields: &mut Vec<Field>| {
///     fields.retain(|f| !matches!(f, Field::String(key, _) if key == "password"));
///     HookAction::Forward
/// };
/// # let _: &dyn field_logger::Hook = &redact;
/// ```
pub trait Hook: Send + Sync {
    fn hook(&self, fields: &mut Vec<Field>) -> HookAction;
}

impl<F> Hook for F
where
    F: Fn(&mut Vec<Field>) -> HookAction + Send + Sync,
{
    fn hook(&self, fields: &mut Vec<Field>) -> HookAction {
        self(fields)
    }
}

/// Ordered list of hooks in front of a terminal writer.
///
/// Records flow through the hooks in the order they were added, then into
/// the writer. The first hook that answers [`HookAction::Drop`] ends the
/// walk.
#[derive(Clone)]
pub struct Chain {
    hooks: Vec<Arc<dyn Hook>>,
    writer: Arc<dyn Writer>,
}

impl Chain {
    pub fn new(writer: impl Writer + 'static) -> Self {
        Self::from_arc(Arc::new(writer))
    }

    pub fn from_arc(writer: Arc<dyn Writer>) -> Self {
        Self {
            hooks: Vec::new(),
            writer,
        }
    }

    /// Appends `hook`; it runs after every hook added before it.
    pub fn hook(mut self, hook: impl Hook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    pub fn hooks<I: IntoIterator<Item = Arc<dyn Hook>>>(mut self, hooks: I) -> Self {
        self.hooks.extend(hooks);
        self
    }

    /// Runs the hooks over `fields` and, unless one of them drops the
    /// record, hands the result to the writer.
    pub fn dispatch(&self, fields: &mut Vec<Field>) -> Result<()> {
        for hook in &self.hooks {
            if hook.hook(fields) == HookAction::Drop {
                return Ok(());
            }
        }
        self.writer.write(fields)
    }
}
