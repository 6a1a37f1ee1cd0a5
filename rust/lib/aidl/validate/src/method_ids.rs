//! Method transaction ids.
//!
//! An interface is either fully self-numbered or fully auto-numbered.
//! Auto numbering follows declaration order, which generated transport
//! code relies on for dispatch.

use std::collections::HashMap;

use aidl_ir::{Diagnostics, Method};
use tracing::debug;

/// Smallest id a user may assign. Offset from `FIRST_CALL_TRANSACTION` (1).
pub const MIN_USER_SET_METHOD_ID: i32 = 0;

/// Largest id a user may assign. Offset from `LAST_CALL_TRANSACTION`
/// (16777215), one below the transport's reserved ceiling.
pub const MAX_USER_SET_METHOD_ID: i32 = 16_777_214;

/// Check explicit ids and, if none were given, assign `0, 1, 2, ...`.
///
/// Stops at the first problem in declaration order; on failure no ids
/// are assigned.
pub fn assign_method_ids(filename: &str, methods: &mut [Method], diags: &mut Diagnostics) -> bool {
    let mut used: HashMap<i32, usize> = HashMap::new();
    let mut has_assigned = false;
    let mut has_unassigned = false;

    for (index, method) in methods.iter().enumerate() {
        match method.id {
            Some(id) => {
                has_assigned = true;

                if !(MIN_USER_SET_METHOD_ID..=MAX_USER_SET_METHOD_ID).contains(&id) {
                    diags.error(
                        filename,
                        method.line,
                        format!("Found out of bounds id ({}) for method: {}", id, method.name),
                    );
                    diags.note(
                        filename,
                        method.line,
                        format!(
                            "    Value for id must be between {} and {} inclusive.",
                            MIN_USER_SET_METHOD_ID, MAX_USER_SET_METHOD_ID
                        ),
                    );
                    return false;
                }

                if let Some(&first) = used.get(&id) {
                    let previous = &methods[first];
                    diags.error(
                        filename,
                        method.line,
                        format!("Found duplicate method id ({}) for method: {}", id, method.name),
                    );
                    diags.note(
                        filename,
                        previous.line,
                        format!("    id {} previously used by method: {}", id, previous.name),
                    );
                    return false;
                }
                used.insert(id, index);
            }
            None => has_unassigned = true,
        }

        if has_assigned && has_unassigned {
            diags.file_error(
                filename,
                "You must either assign id's to all methods or to none of them.",
            );
            return false;
        }
    }

    if has_unassigned {
        for (next, method) in (0..).zip(methods.iter_mut()) {
            method.id = Some(next);
        }
        debug!("{}: assigned ids 0..{}", filename, methods.len());
    }

    true
}
