use rawmap_core::RawEnum as _;
use rawmap_macros::{raw_model, RawEnum};

#[derive(RawEnum, Debug, PartialEq)]
enum Kind {
    #[raw("text")]
    Text,
    #[raw("email")]
    Email,
    Other(String),
}

#[raw_model(hashable)]
pub struct Location {
    #[raw(default = 0.0)]
    pub latitude: f64,
    #[raw(default = 0.0)]
    pub longitude: f64,
}

#[raw_model(equatable)]
#[derive(Debug)]
pub struct Device {
    #[raw("type", default = Kind::Text)]
    pub kind: Kind,

    #[raw(default = 0)]
    pub var: i64,

    pub history: Vec<Location>,

    pub note: Option<String>,

    pub tags: Option<Vec<String>>,

    #[raw(skip)]
    pub cached: u32,
}

fn main() {
    let mut device = Device::from_raw(rawmap_core::RawMap::new());
    assert_eq!(device.var(), 0);
    assert_eq!(device.kind(), Kind::Text);

    device.set_var(3);
    device.set_note(Some("hi".to_string()));
    assert_eq!(device.var(), 3);
    assert!(device.raw().contains_key("note"));

    assert_eq!(Kind::from_raw_value("email"), Some(Kind::Email));
    assert_eq!(
        Kind::from_raw_value("anything"),
        Some(Kind::Other("anything".to_string()))
    );
}
