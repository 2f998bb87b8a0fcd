// Default value functions

pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_port() -> u16 {
    8005
}

pub fn default_workers() -> usize {
    0 // 0 = one worker per CPU
}

pub fn default_oracle_host() -> String {
    "10.6.46.114".to_string()
}

pub fn default_oracle_port() -> u16 {
    8087
}

pub fn default_insert_endpoint() -> String {
    "/exec".to_string()
}

pub fn default_procedure_endpoint() -> String {
    "/procedure".to_string()
}

pub fn default_oracle_token() -> String {
    "demo".to_string()
}

pub fn default_schema() -> String {
    "GANANCIAS".to_string()
}

pub fn default_request_timeout_seconds() -> u64 {
    30
}

pub fn default_true() -> bool {
    true
}

pub fn default_log_directory() -> String {
    "./logs".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_log_format() -> String {
    "compact".to_string()
}

pub fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

pub fn default_cors_methods() -> Vec<String> {
    vec!["POST".to_string(), "GET".to_string(), "OPTIONS".to_string()]
}

pub fn default_cors_headers() -> Vec<String> {
    vec!["Content-Type".to_string(), "Authorization".to_string()]
}

pub fn default_cors_max_age() -> u64 {
    3600
}

pub fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024 // 10MB
}
