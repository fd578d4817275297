// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wraps a built [`Tool`] with a [`RateLimiter`] derived from its
//! schema's `rate_limit` string, so a denied call surfaces as a
//! non-retriable `denied` tool error (spec.md §4.G) rather than reaching
//! the tool at all.

use crate::rate_limit::RateLimiter;
use crate::tool::{Tool, ToolError, ToolSchema};
use agentcore_core::ExecutionContext;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub struct RateLimitedTool {
    inner: Arc<dyn Tool>,
    limiter: RateLimiter,
}

impl RateLimitedTool {
    pub fn new(inner: Arc<dyn Tool>, limiter: RateLimiter) -> Self {
        Self { inner, limiter }
    }
}

#[async_trait]
impl Tool for RateLimitedTool {
    async fn execute(&self, input: Value, ctx: &ExecutionContext) -> Result<Value, ToolError> {
        if !self.limiter.try_acquire() {
            return Err(ToolError::denied("rate_limited", "rate limit exceeded"));
        }
        self.inner.execute(input, ctx).await
    }

    fn describe(&self) -> ToolSchema {
        self.inner.describe()
    }

    fn validate_input(&self, input: Value) -> Result<Value, ToolError> {
        self.inner.validate_input(input)
    }

    async fn cleanup(&self) {
        self.inner.cleanup().await
    }
}

#[cfg(test)]
#[path = "rate_limited_tool_tests.rs"]
mod tests;
