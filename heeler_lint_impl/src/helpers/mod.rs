// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

pub mod architecture_lint_collection;
pub mod architecture_lint_runner;
pub mod lint_helpers;
pub mod queries;
