use mo_diff_core::RawRecord;

use crate::entity::ControllerNode;
use crate::fields;

/// Normalize cluster controller records.
///
/// Controller health arrives as a text token on some controller versions
/// and a number on others; `resolve_health` handles both.
pub fn controllers(records: &[RawRecord]) -> Vec<ControllerNode> {
    records
        .iter()
        .map(|record| ControllerNode {
            name: fields::resolve_str(record, fields::CONTROLLER_NAME),
            serial: fields::resolve_str(record, fields::CONTROLLER_SERIAL),
            mode: record.attr_or_empty("apicMode").to_string(),
            oper_status: fields::resolve_str(record, fields::OPER_STATUS),
            health: fields::resolve_health(record, fields::HEALTH),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use mo_diff_core::RawRecord;

    use super::controllers;

    fn controller(attrs: &[(&str, &str)]) -> RawRecord {
        let mut rec = RawRecord::new("infraWiNode");
        for (name, value) in attrs {
            rec.attributes.insert(name.to_string(), value.to_string());
        }
        rec
    }

    #[test]
    fn normalizes_token_health_and_fallback_names() {
        let records = vec![
            controller(&[
                ("nodeName", "apic1"),
                ("mbSn", "FCH1"),
                ("apicMode", "active"),
                ("operSt", "available"),
                ("health", "fully-fit"),
            ]),
            controller(&[("id", "2"), ("health", "degraded")]),
        ];

        let nodes = controllers(&records);
        assert_eq!(nodes[0].name, "apic1");
        assert_eq!(nodes[0].serial, "FCH1");
        assert_eq!(nodes[0].health, 100);
        assert_eq!(nodes[1].name, "2");
        assert_eq!(nodes[1].health, 50);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let nodes = controllers(&[controller(&[])]);
        assert_eq!(nodes[0].name, "");
        assert_eq!(nodes[0].oper_status, "");
        assert_eq!(nodes[0].health, 0);
    }
}
