pub const DEFAULT_SERVICE_NAME: &str = "climate-api";
pub const DEFAULT_HOST: &str = "0.0.0.0";

pub fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

pub fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

pub fn default_port() -> u16 {
    5000
}

pub fn default_database_path() -> String {
    "Resources/hawaii.sqlite".to_string()
}

pub fn default_max_connections() -> u32 {
    5
}

/// Most active station in the Hawaii dataset.
pub fn default_reference_station() -> String {
    "USC00519281".to_string()
}

/// Lookback for `/tobs` starts at 2016-08-18 with this value.
pub fn default_reference_date() -> String {
    "2017-08-18".to_string()
}

pub fn default_log_format() -> String {
    "pretty".to_string()
}
