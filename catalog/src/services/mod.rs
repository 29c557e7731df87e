pub mod json_file_service;
