//! Workspace-level integration tests for ChudPi live under `tests/`.
