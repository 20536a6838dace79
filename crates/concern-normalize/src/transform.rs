//! Applying transforms to record fields.

use concern_model::{MethodChain, Record, Result, Transform};
use tracing::{debug, trace};

/// Apply `transform` to each listed field of `record`.
///
/// Fields the record does not declare are skipped. A callable transform is
/// applied to every remaining field, null or not, and its errors stop the
/// run. A method chain only touches non-null fields and leaves a value
/// alone when the value does not support one of its steps.
///
/// Returns the number of fields written.
pub fn apply_transform<I, S>(
    record: &mut dyn Record,
    transform: &Transform,
    fields: I,
) -> Result<usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    match transform {
        Transform::Chain(chain) => Ok(apply_chain(record, chain, fields)),
        Transform::Func(_) => {
            let mut written = 0;
            for field in fields {
                let field = field.as_ref();
                if !record.has_field(field) {
                    trace!(field, "skipping undeclared field");
                    continue;
                }
                let next = transform.apply(record.get(field))?;
                record.set(field, next);
                written += 1;
            }
            debug!(written, "applied callable transform");
            Ok(written)
        }
    }
}

pub(crate) fn apply_chain<I, S>(record: &mut dyn Record, chain: &MethodChain, fields: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut written = 0;
    for field in fields {
        let field = field.as_ref();
        if !record.has_value(field) {
            continue;
        }
        match chain.apply(&record.get(field)) {
            Some(next) => {
                record.set(field, next);
                written += 1;
            }
            None => trace!(field, %chain, "value does not support chain"),
        }
    }
    debug!(%chain, written, "applied method chain");
    written
}
