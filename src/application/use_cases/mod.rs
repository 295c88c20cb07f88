pub mod seed_mock_table_info;
pub mod select_new_mocks;
