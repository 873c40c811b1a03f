// jablock state managers
// Managers own stateful lifecycles: the cross-tab counter aggregator and
// per-page contexts.

pub mod counter_aggregator;
pub mod page_context;
