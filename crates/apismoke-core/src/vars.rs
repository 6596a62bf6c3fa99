// crates/apismoke-core/src/vars.rs
// ============================================================================
// Module: Apismoke Variable Resolver
// Description: `::name::` placeholder substitution with tiered precedence.
// Purpose: Resolve contract templates against locals, globals, and the
// environment.
// Dependencies: crate::context, crate::error, crate::interfaces, regex
// ============================================================================

//! ## Overview
//! Templates reference values not known until suite definition or run time
//! through `::name::` placeholders. Each placeholder resolves through three
//! tiers, first match wins: contract locals, run-context globals, then the
//! environment under the upper-cased name. An environment value that is the
//! empty string counts as not found. The placeholder grammar is fixed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::context::RunContext;
use crate::error::VariableError;
use crate::interfaces::Environment;

// ============================================================================
// SECTION: Placeholder Grammar
// ============================================================================

/// Fixed placeholder grammar: `::` + word characters + `::`.
const PLACEHOLDER_PATTERN: &str = r"::(\w+)::";

/// Returns the compiled placeholder regex, built once per process.
#[allow(clippy::unwrap_used, reason = "The placeholder pattern is a fixed valid regex.")]
fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).unwrap())
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Substitutes every placeholder in `template`, or fails on the first name
/// no tier can resolve.
///
/// Substitution replaces all occurrences of a resolved placeholder. When a
/// name cannot be resolved the template is returned untouched inside the
/// error path; no partial substitution is committed for that name.
///
/// # Errors
///
/// Returns [`VariableError::NotFound`] naming the first unresolvable
/// placeholder.
pub fn resolve_template(
    template: &str,
    locals: &BTreeMap<String, String>,
    ctx: &RunContext,
    env: &dyn Environment,
) -> Result<String, VariableError> {
    let placeholders: Vec<(String, String)> = placeholder_regex()
        .captures_iter(template)
        .map(|captures| (captures[0].to_string(), captures[1].to_string()))
        .collect();
    if placeholders.is_empty() {
        return Ok(template.to_string());
    }

    let mut resolved = template.to_string();
    for (token, name) in placeholders {
        match lookup(&name, locals, ctx, env) {
            Some(value) => resolved = resolved.replace(&token, &value),
            None => {
                return Err(VariableError::NotFound {
                    name,
                });
            }
        }
    }
    Ok(resolved)
}

/// Resolves one name through the three-tier precedence chain.
fn lookup(
    name: &str,
    locals: &BTreeMap<String, String>,
    ctx: &RunContext,
    env: &dyn Environment,
) -> Option<String> {
    if let Some(value) = locals.get(name) {
        return Some(value.clone());
    }
    if let Some(value) = ctx.global(name) {
        return Some(value.to_string());
    }
    match env.var(&name.to_uppercase()) {
        Some(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
