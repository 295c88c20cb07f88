pub mod identifier;
pub mod mock_batch;
pub mod source_table;
pub mod table_info;
pub mod target_columns;
