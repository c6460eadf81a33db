pub mod scan_logger;
