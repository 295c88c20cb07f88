pub mod db_config;
pub mod ddl_template;
pub mod manifest;
pub mod mock_id_file;
pub mod postgres_store;
