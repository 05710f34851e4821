//! Lint checks over a finished conversion.
//!
//! None of these findings stop the conversion; they point at objects that
//! will probably need a manual look after migrating: references to templates
//! that were never defined, duplicate definitions, and legacy properties
//! that had no counterpart in the new syntax.

use std::collections::HashSet;
use std::fmt;

use crate::transform::ConversionContext;

/// A lint warning about a converted object
#[derive(Debug)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    UnresolvedParent,
    Duplicate,
    Dropped,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::UnresolvedParent => write!(f, "unresolved-parent"),
            LintCategory::Duplicate => write!(f, "duplicate"),
            LintCategory::Dropped => write!(f, "dropped"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

/// Run all lint checks on a completed conversion.
pub fn check(ctx: &ConversionContext) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_parents(ctx, &mut warnings);
    check_duplicates(ctx, &mut warnings);
    check_dropped(ctx, &mut warnings);
    warnings
}

/// Parents must name an object of the same (output) type. Forward
/// references are fine, so this runs over the whole registry.
fn check_parents(ctx: &ConversionContext, warnings: &mut Vec<LintWarning>) {
    let mut reported = HashSet::new();
    for object in ctx.objects() {
        for parent in &object.parents {
            if ctx.contains(&object.object_type, parent) {
                continue;
            }
            if !reported.insert((object.object_type.as_str(), object.name.as_str(), parent.as_str())) {
                continue;
            }
            warnings.push(LintWarning {
                category: LintCategory::UnresolvedParent,
                message: format!(
                    "{} \"{}\" (line {}) inherits unknown {} \"{}\"",
                    object.object_type, object.name, object.line, object.object_type, parent
                ),
            });
        }
    }
}

fn check_duplicates(ctx: &ConversionContext, warnings: &mut Vec<LintWarning>) {
    for (object_type, name, count) in ctx.duplicates() {
        warnings.push(LintWarning {
            category: LintCategory::Duplicate,
            message: format!("{} \"{}\" is defined {} times", object_type, name, count),
        });
    }
}

fn check_dropped(ctx: &ConversionContext, warnings: &mut Vec<LintWarning>) {
    for dropped in ctx.dropped() {
        warnings.push(LintWarning {
            category: LintCategory::Dropped,
            message: format!(
                "{} \"{}\" (line {}): property '{}' has no equivalent and was dropped",
                dropped.object_type, dropped.name, dropped.line, dropped.key
            ),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Object;

    #[test]
    fn test_clean_context_has_no_warnings() {
        let mut ctx = ConversionContext::new();
        ctx.register(&Object::new("host", "generic-host"), 1);
        ctx.register(&Object::new("host", "web1").with_parent("generic-host"), 5);
        assert!(check(&ctx).is_empty());
    }

    #[test]
    fn test_forward_reference_resolves() {
        let mut ctx = ConversionContext::new();
        ctx.register(&Object::new("host", "web1").with_parent("generic-host"), 1);
        ctx.register(&Object::new("host", "generic-host"), 5);
        assert!(check(&ctx).is_empty());
    }

    #[test]
    fn test_unresolved_parent_is_reported_once() {
        let mut ctx = ConversionContext::new();
        ctx.register(
            &Object::new("service", "ping")
                .with_parent("check_ping")
                .with_parent("check_ping"),
            3,
        );
        let warnings = check(&ctx);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::UnresolvedParent);
        assert!(warnings[0].message.contains("check_ping"));
        assert!(warnings[0].message.contains("line 3"));
    }

    #[test]
    fn test_parent_of_other_type_is_unresolved() {
        let mut ctx = ConversionContext::new();
        ctx.register(&Object::new("host", "base"), 1);
        ctx.register(&Object::new("service", "s").with_parent("base"), 2);
        let categories: Vec<_> = check(&ctx).iter().map(|w| w.category).collect();
        assert_eq!(categories, vec![LintCategory::UnresolvedParent]);
    }

    #[test]
    fn test_duplicates_and_dropped() {
        let mut ctx = ConversionContext::new();
        let group = Object::new("hostgroup", "web");
        ctx.register(&group, 1);
        ctx.register(&group, 6);
        ctx.record_dropped(&group, "notes", 6);
        let warnings = check(&ctx);
        let rendered: Vec<String> = warnings.iter().map(|w| w.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "duplicate: hostgroup \"web\" is defined 2 times".to_string(),
                "dropped: hostgroup \"web\" (line 6): property 'notes' has no equivalent and was dropped"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_category_names() {
        assert_eq!(LintCategory::UnresolvedParent.to_string(), "unresolved-parent");
        assert_eq!(LintCategory::Duplicate.to_string(), "duplicate");
        assert_eq!(LintCategory::Dropped.to_string(), "dropped");
    }
}
