use crate::intake::detect_environment;

pub fn cmd_detect(args: &[String]) -> Result<String, String> {
    if args.is_empty() {
        return Err("usage: detect <user-agent>".to_string());
    }
    let user_agent = args.join(" ");
    let detected = detect_environment(&user_agent);
    Ok(format!(
        "device={}\nbrowser={}\nos={}",
        detected.device.label(),
        detected.browser.label(),
        detected.os.label()
    ))
}
