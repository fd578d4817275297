// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline Planner (spec.md §4.F): turns a validated pipeline's step
//! graph into ordered levels ready for the executor.

use agentcore_core::{CoreError, ErrorKind};
use agentcore_schema::Pipeline;
use std::collections::{HashMap, HashSet};

/// A pipeline's steps grouped into dependency levels. Steps within a
/// level have no dependency on one another and may run concurrently;
/// levels themselves run in order.
#[derive(Debug, Clone)]
pub struct PipelinePlan {
    pub levels: Vec<Vec<String>>,
}

impl PipelinePlan {
    pub fn step_count(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }
}

/// Level the pipeline's steps by in-degree, repeatedly peeling off the
/// steps with no unresolved dependency. Ties within a level break
/// lexicographically by step name for reproducible test runs.
///
/// The validator (`agentcore_schema::validate`) already rejects cyclic
/// pipelines before they reach here; a cycle surfacing at plan time
/// means a pipeline bypassed validation, so it is treated as an
/// internal invariant violation rather than a user-facing error.
pub fn plan(pipeline: &Pipeline) -> Result<PipelinePlan, CoreError> {
    let mut in_degree: HashMap<&str, usize> = HashMap::new();
    let mut successors: HashMap<&str, Vec<&str>> = HashMap::new();

    for step in &pipeline.steps {
        in_degree.entry(step.name.as_str()).or_insert(0);
        for dep in &step.depends_on {
            in_degree.entry(dep.as_str()).or_insert(0);
            *in_degree.entry(step.name.as_str()).or_insert(0) += 1;
            successors.entry(dep.as_str()).or_default().push(step.name.as_str());
        }
    }

    let mut remaining: HashSet<&str> = pipeline.steps.iter().map(|s| s.name.as_str()).collect();
    let mut levels = Vec::new();

    while !remaining.is_empty() {
        let mut ready: Vec<&str> = remaining
            .iter()
            .copied()
            .filter(|name| in_degree.get(name).copied().unwrap_or(0) == 0)
            .collect();

        if ready.is_empty() {
            return Err(CoreError::new(
                ErrorKind::Internal,
                "pipeline step graph contains a cycle that escaped validation",
            ));
        }

        ready.sort_unstable();

        for name in &ready {
            remaining.remove(name);
            if let Some(succs) = successors.get(name) {
                for succ in succs {
                    if let Some(degree) = in_degree.get_mut(succ) {
                        *degree = degree.saturating_sub(1);
                    }
                }
            }
        }

        levels.push(ready.into_iter().map(str::to_string).collect());
    }

    Ok(PipelinePlan { levels })
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
