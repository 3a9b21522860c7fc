pub mod task_definition;
