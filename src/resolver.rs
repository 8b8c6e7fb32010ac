//! Per-criterion resolution: parameter validation, the conditional guard,
//! and the stack-driven prerequisite chain walk.

use std::collections::HashSet;

use tracing::debug;

use crate::bundle::ReferenceBundle;
use crate::error::{EngineError, EngineResult};
use crate::method::builtin::{DEFAULT_UNIT_CODE_SYSTEM, UNIT_OF_MEASURE_VALID};
use crate::method::{MethodContext, MethodOutcome, MethodRegistry};
use crate::model::data::ItemData;
use crate::model::entity::Entity;
use crate::model::item::ItemPath;
use crate::result::{EvaluationResult, ProcessingState};
use crate::rubric::{EvaluationCriterion, MethodParameter, SamDefinition};

/// Skip reason recorded when a criterion's declared parameters are missing
/// or empty.
pub const INVALID_CRITERIA_REASON: &str = "invalid evaluation criteria";

/// Evaluate one criterion against one item.
///
/// Returns every result record produced, in execution order: guard-chain
/// records first (when a conditional method is declared), then the primary
/// chain's prerequisite records, then the primary result last. Business
/// outcomes land in the records; only configuration and implementation
/// faults surface as `Err`, aborting the whole request.
#[tracing::instrument(
    skip_all,
    level = "debug",
    fields(item = %path, method = %criterion.sam_mnemonic)
)]
pub async fn resolve(
    entity: &Entity,
    data: Option<&ItemData>,
    path: &ItemPath,
    criterion: &EvaluationCriterion,
    bundle: &ReferenceBundle,
    registry: &MethodRegistry,
    max_chain_depth: usize,
) -> EngineResult<Vec<EvaluationResult>> {
    let mut results = Vec::new();
    let mut primary = EvaluationResult::primary(path, criterion);

    // Definitions must exist before anything executes; a dangling mnemonic
    // means the bundle is inconsistent.
    let target_definition = bundle.sam_definition(&criterion.sam_mnemonic)?;
    let guard_definition = match &criterion.condition_sam {
        Some(guard) => Some(bundle.sam_definition(guard)?),
        None => None,
    };

    // Built-in validity check of the criterion itself. No method executes
    // when the declared parameters are incomplete.
    let parameters_valid = parameters_satisfy(target_definition, &criterion.parameters)
        && guard_definition
            .is_none_or(|def| parameters_satisfy(def, &criterion.condition_parameters));
    if !parameters_valid {
        primary.mark_skipped(INVALID_CRITERIA_REASON);
        results.push(primary);
        return Ok(results);
    }

    // Conditional guard: a failing guard downgrades the criterion to a
    // skip; the primary method never runs.
    if let Some(guard_mnemonic) = &criterion.condition_sam {
        let mut guard = EvaluationResult::conditional(path, criterion, guard_mnemonic);
        walk_chain(
            &mut guard,
            guard_mnemonic,
            &criterion.condition_parameters,
            true,
            entity,
            data,
            path,
            criterion,
            bundle,
            registry,
            max_chain_depth,
            &mut results,
        )
        .await?;
        let guard_failed = guard.state == ProcessingState::Failed;
        let guard_reason = guard.reason.clone();
        results.push(guard);
        if guard_failed {
            primary.mark_skipped(
                guard_reason.unwrap_or_else(|| "conditional assessment not met".to_string()),
            );
            results.push(primary);
            return Ok(results);
        }
    }

    walk_chain(
        &mut primary,
        &criterion.sam_mnemonic,
        &criterion.parameters,
        false,
        entity,
        data,
        path,
        criterion,
        bundle,
        registry,
        max_chain_depth,
        &mut results,
    )
    .await?;
    results.push(primary);
    Ok(results)
}

/// Every parameter the definition declares must be supplied with a
/// non-empty value.
fn parameters_satisfy(definition: &SamDefinition, supplied: &[MethodParameter]) -> bool {
    definition.parameters.iter().all(|declared| {
        supplied
            .iter()
            .any(|p| p.name == declared.name && !p.value.trim().is_empty())
    })
}

/// Fixed parameters for methods executed as intermediate prerequisites,
/// which otherwise run parameterless. Unit validation is pinned to UCUM by
/// convention.
fn implicit_parameters(mnemonic: &str) -> Vec<MethodParameter> {
    if mnemonic == UNIT_OF_MEASURE_VALID {
        vec![MethodParameter::new("code-system", DEFAULT_UNIT_CODE_SYSTEM)]
    } else {
        Vec::new()
    }
}

/// Walk one prerequisite chain, marking `target` with the terminal state.
///
/// Discovery pushes each mnemonic onto a stack while following the
/// prerequisite links; popping executes the deepest prerequisite first and
/// the requested method last. Execution is fail-fast: the first failing
/// step marks the target and the rest of the chain never runs. Every
/// non-target step leaves a dependent record in `side_records`.
#[allow(clippy::too_many_arguments)]
async fn walk_chain(
    target: &mut EvaluationResult,
    target_mnemonic: &str,
    target_parameters: &[MethodParameter],
    within_guard: bool,
    entity: &Entity,
    data: Option<&ItemData>,
    path: &ItemPath,
    criterion: &EvaluationCriterion,
    bundle: &ReferenceBundle,
    registry: &MethodRegistry,
    max_chain_depth: usize,
    side_records: &mut Vec<EvaluationResult>,
) -> EngineResult<()> {
    let mut stack = Vec::new();
    let mut seen = HashSet::new();
    let mut next = Some(target_mnemonic.to_string());
    while let Some(mnemonic) = next {
        if !seen.insert(mnemonic.clone()) {
            return Err(EngineError::PrerequisiteCycle { mnemonic });
        }
        if stack.len() >= max_chain_depth {
            return Err(EngineError::ChainTooDeep {
                mnemonic: target_mnemonic.to_string(),
            });
        }
        let definition = bundle.sam_definition(&mnemonic)?;
        next = definition.prerequisite.clone();
        stack.push(mnemonic);
    }

    while let Some(mnemonic) = stack.pop() {
        let is_target = stack.is_empty();
        let parameters = if is_target {
            target_parameters.to_vec()
        } else {
            implicit_parameters(&mnemonic)
        };
        let context = MethodContext {
            entity,
            data,
            parameters,
            bundle,
        };
        debug!(%mnemonic, is_target, "executing assessment method");
        let outcome = registry.resolve(&mnemonic).evaluate(&context).await?;

        if !is_target {
            let mut record = EvaluationResult::dependent(path, criterion, &mnemonic, within_guard);
            match &outcome {
                MethodOutcome::Succeeded => record.mark_passed(),
                MethodOutcome::Failed { reason } => record.mark_failed(&mnemonic, reason.clone()),
                MethodOutcome::Skipped { reason } => record.mark_skipped(reason.clone()),
                MethodOutcome::Errored { .. } => {}
            }
            side_records.push(record);
        }

        match outcome {
            MethodOutcome::Succeeded => {
                if is_target {
                    target.mark_passed();
                }
            }
            MethodOutcome::Failed { reason } => {
                target.mark_failed(&mnemonic, reason);
                return Ok(());
            }
            MethodOutcome::Skipped { reason } => {
                target.mark_skipped(reason);
                return Ok(());
            }
            MethodOutcome::Errored { message } => {
                return Err(EngineError::MethodError { mnemonic, message });
            }
        }
    }
    Ok(())
}
