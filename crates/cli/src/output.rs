//! Rendering of lookup results for the terminal.

use ferrous_acme_dns_domain::{CaaRecord, HostLookup, TxtLookup};
use ferrous_acme_dns_infrastructure::dns::Exchange;
use serde_json::json;

pub fn txt(name: &str, txt: &TxtLookup, as_json: bool) -> String {
    if as_json {
        return json!({
            "name": name,
            "type": "TXT",
            "values": txt.values,
            "rtt_ms": txt.rtt.as_secs_f64() * 1000.0,
        })
        .to_string();
    }

    if txt.is_empty() {
        return format!("{}: no TXT records", name);
    }

    txt.values
        .iter()
        .map(|v| format!("{} TXT \"{}\"", name, v))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn cname(name: &str, target: &str, as_json: bool) -> String {
    if as_json {
        return json!({ "name": name, "type": "CNAME", "target": target }).to_string();
    }
    format!("{} CNAME {}", name, target)
}

pub fn caa(name: &str, records: &[CaaRecord], as_json: bool) -> String {
    if as_json {
        let records: Vec<_> = records
            .iter()
            .map(|r| {
                json!({
                    "flags": r.flags,
                    "critical": r.issuer_critical(),
                    "tag": r.tag,
                    "value": r.value_lossy(),
                })
            })
            .collect();
        return json!({ "name": name, "type": "CAA", "records": records }).to_string();
    }

    if records.is_empty() {
        return format!("{}: no CAA records", name);
    }

    records
        .iter()
        .map(|r| format!("{} CAA {}", name, r))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn host(name: &str, host: &HostLookup, as_json: bool) -> String {
    if as_json {
        return json!({
            "name": name,
            "type": "A",
            "addresses": host.addresses,
            "rtt_ms": host.rtt.as_secs_f64() * 1000.0,
        })
        .to_string();
    }

    if host.addresses.is_empty() {
        return format!("{}: no addresses", name);
    }

    host.addresses
        .iter()
        .map(|ip| format!("{} A {}", name, ip))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn exchange(name: &str, exchange: &Exchange, as_json: bool) -> String {
    let answers: Vec<String> = exchange
        .response
        .answers()
        .iter()
        .map(|r| r.to_string())
        .collect();

    if as_json {
        return json!({
            "name": name,
            "server": exchange.server.to_string(),
            "rcode": exchange.response.rcode_str(),
            "truncated": exchange.response.truncated,
            "answers": answers,
            "rtt_ms": exchange.rtt.as_secs_f64() * 1000.0,
        })
        .to_string();
    }

    let mut lines = vec![format!(
        ";; {} from {} in {:.1} ms",
        exchange.response.rcode_str(),
        exchange.server,
        exchange.rtt.as_secs_f64() * 1000.0
    )];
    lines.extend(answers);
    lines.join("\n")
}
