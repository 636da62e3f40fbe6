use crate::constants::HARDWARE_ID_HEX_WIDTH;

/// Render a hardware id the way the sensor table keys it: 12 lowercase hex digits.
pub fn format_hardware_id(hardware_id: u64) -> String {
    format!("{:0width$x}", hardware_id, width = HARDWARE_ID_HEX_WIDTH)
}
