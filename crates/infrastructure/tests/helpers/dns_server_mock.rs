#![allow(dead_code)]
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

pub const RCODE_NOERROR: u8 = 0;
pub const RCODE_SERVFAIL: u8 = 2;
pub const RCODE_NXDOMAIN: u8 = 3;
pub const RCODE_REFUSED: u8 = 5;

pub const TYPE_A: u16 = 1;
pub const TYPE_CNAME: u16 = 5;
pub const TYPE_SOA: u16 = 6;
pub const TYPE_TXT: u16 = 16;
pub const TYPE_CAA: u16 = 257;

#[derive(Debug, Clone)]
pub struct MockRecord {
    rtype: u16,
    rdata: Vec<u8>,
}

impl MockRecord {
    pub fn txt(strings: &[&str]) -> Self {
        let mut rdata = Vec::new();
        for s in strings {
            rdata.push(s.len() as u8);
            rdata.extend_from_slice(s.as_bytes());
        }
        Self { rtype: TYPE_TXT, rdata }
    }

    pub fn cname(target: &str) -> Self {
        Self {
            rtype: TYPE_CNAME,
            rdata: encode_name(target),
        }
    }

    pub fn caa(flags: u8, tag: &str, value: &str) -> Self {
        let mut rdata = vec![flags, tag.len() as u8];
        rdata.extend_from_slice(tag.as_bytes());
        rdata.extend_from_slice(value.as_bytes());
        Self { rtype: TYPE_CAA, rdata }
    }

    pub fn a(ip: Ipv4Addr) -> Self {
        Self {
            rtype: TYPE_A,
            rdata: ip.octets().to_vec(),
        }
    }

    pub fn soa(zone: &str) -> Self {
        let mut rdata = encode_name(&format!("ns1.{}", zone));
        rdata.extend(encode_name(&format!("hostmaster.{}", zone)));
        for value in [1u32, 3600, 900, 604_800, 300] {
            rdata.extend_from_slice(&value.to_be_bytes());
        }
        Self {
            rtype: TYPE_SOA,
            rdata,
        }
    }
}

#[derive(Debug, Clone)]
pub enum MockReply {
    Answer {
        rcode: u8,
        answers: Vec<MockRecord>,
        truncated: bool,
    },
    Silent,
}

impl MockReply {
    pub fn records(answers: Vec<MockRecord>) -> Self {
        MockReply::Answer {
            rcode: RCODE_NOERROR,
            answers,
            truncated: false,
        }
    }

    pub fn rcode(rcode: u8) -> Self {
        MockReply::Answer {
            rcode,
            answers: vec![],
            truncated: false,
        }
    }

    pub fn servfail() -> Self {
        Self::rcode(RCODE_SERVFAIL)
    }

    pub fn nxdomain() -> Self {
        Self::rcode(RCODE_NXDOMAIN)
    }

    pub fn truncated(answers: Vec<MockRecord>) -> Self {
        MockReply::Answer {
            rcode: RCODE_NOERROR,
            answers,
            truncated: true,
        }
    }

    pub fn with_rcode(self, new_rcode: u8) -> Self {
        match self {
            MockReply::Answer {
                answers, truncated, ..
            } => MockReply::Answer {
                rcode: new_rcode,
                answers,
                truncated,
            },
            MockReply::Silent => MockReply::Silent,
        }
    }
}

/// Replies keyed by lowercase fully-qualified name and query type.
#[derive(Debug, Clone)]
pub struct MockZone {
    entries: HashMap<(String, u16), MockReply>,
    fallback: MockReply,
}

impl MockZone {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            fallback: MockReply::nxdomain(),
        }
    }

    pub fn silent() -> Self {
        Self {
            entries: HashMap::new(),
            fallback: MockReply::Silent,
        }
    }

    pub fn with(mut self, name: &str, rtype: u16, reply: MockReply) -> Self {
        self.entries.insert((normalize(name), rtype), reply);
        self
    }

    fn reply_for(&self, name: &str, rtype: u16) -> &MockReply {
        self.entries
            .get(&(name.to_string(), rtype))
            .unwrap_or(&self.fallback)
    }
}

#[derive(Default)]
struct Observed {
    queries: AtomicUsize,
    last_dnssec_ok: AtomicBool,
    last_recursion_desired: AtomicBool,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    observed: Arc<Observed>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start_udp(zone: MockZone) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let observed = Arc::new(Observed::default());
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task_observed = observed.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = answer(&zone, &task_observed, &buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            observed,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub async fn start_tcp(zone: MockZone) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let observed = Arc::new(Observed::default());
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task_observed = observed.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = listener.accept() => {
                        let Ok((mut stream, _)) = result else { continue };
                        let zone = zone.clone();
                        let observed = task_observed.clone();
                        tokio::spawn(async move {
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                return;
                            }
                            let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut query).await.is_err() {
                                return;
                            }
                            if let Some(response) = answer(&zone, &observed, &query) {
                                let len = (response.len() as u16).to_be_bytes();
                                let _ = stream.write_all(&len).await;
                                let _ = stream.write_all(&response).await;
                            }
                        });
                    }
                }
            }
        });

        Ok(Self {
            addr,
            observed,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn addr_string(&self) -> String {
        self.addr.to_string()
    }

    pub fn query_count(&self) -> usize {
        self.observed.queries.load(Ordering::SeqCst)
    }

    pub fn last_dnssec_ok(&self) -> bool {
        self.observed.last_dnssec_ok.load(Ordering::SeqCst)
    }

    pub fn last_recursion_desired(&self) -> bool {
        self.observed.last_recursion_desired.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn answer(zone: &MockZone, observed: &Observed, query: &[u8]) -> Option<Vec<u8>> {
    let question = parse_question(query)?;

    observed.queries.fetch_add(1, Ordering::SeqCst);
    observed
        .last_dnssec_ok
        .store(question.dnssec_ok, Ordering::SeqCst);
    observed
        .last_recursion_desired
        .store(query[2] & 0x01 != 0, Ordering::SeqCst);

    match zone.reply_for(&question.name, question.qtype) {
        MockReply::Silent => None,
        MockReply::Answer {
            rcode,
            answers,
            truncated,
        } => Some(build_response(
            query,
            question.end,
            *rcode,
            answers,
            *truncated,
        )),
    }
}

struct Question {
    name: String,
    qtype: u16,
    end: usize,
    dnssec_ok: bool,
}

fn parse_question(query: &[u8]) -> Option<Question> {
    if query.len() < 12 {
        return None;
    }

    let mut pos = 12;
    let mut labels = Vec::new();
    loop {
        let len = *query.get(pos)? as usize;
        pos += 1;
        if len == 0 {
            break;
        }
        let label = query.get(pos..pos + len)?;
        labels.push(String::from_utf8_lossy(label).to_ascii_lowercase());
        pos += len;
    }

    let qtype = u16::from_be_bytes([*query.get(pos)?, *query.get(pos + 1)?]);
    let end = pos + 4;

    // OPT: root name, TYPE 41, CLASS, ext-rcode, version, flags
    let dnssec_ok = match query.get(end..end + 9) {
        Some([0x00, 0x00, 0x29, _, _, _, _, flags_hi, _]) => flags_hi & 0x80 != 0,
        _ => false,
    };

    Some(Question {
        name: format!("{}.", labels.join(".")),
        qtype,
        end,
        dnssec_ok,
    })
}

fn build_response(
    query: &[u8],
    question_end: usize,
    rcode: u8,
    answers: &[MockRecord],
    truncated: bool,
) -> Vec<u8> {
    let mut response = Vec::with_capacity(512);

    response.extend_from_slice(&query[0..2]);

    let tc = if truncated { 0x02 } else { 0x00 };
    response.push(0x80 | tc | (query[2] & 0x01));
    response.push(0x80 | (rcode & 0x0f));

    response.extend_from_slice(&[0x00, 0x01]);
    response.extend_from_slice(&(answers.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&[0x00, 0x00]);

    response.extend_from_slice(&query[12..question_end]);

    for record in answers {
        response.extend_from_slice(&[0xc0, 0x0c]);
        response.extend_from_slice(&record.rtype.to_be_bytes());
        response.extend_from_slice(&[0x00, 0x01]);
        response.extend_from_slice(&300u32.to_be_bytes());
        response.extend_from_slice(&(record.rdata.len() as u16).to_be_bytes());
        response.extend_from_slice(&record.rdata);
    }

    response
}

fn normalize(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with('.') {
        lower
    } else {
        format!("{}.", lower)
    }
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut bytes = Vec::new();
    for label in name.trim_end_matches('.').split('.') {
        bytes.push(label.len() as u8);
        bytes.extend_from_slice(label.as_bytes());
    }
    bytes.push(0);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_responds() {
        let zone = MockZone::new().with("example.com", TYPE_A, MockReply::records(vec![]));
        let server = MockDnsServer::start_udp(zone).await.unwrap();

        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let mut query = vec![0x12, 0x34, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        query.extend(encode_name("example.com"));
        query.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);

        client.send_to(&query, server.addr()).await.unwrap();

        let mut buf = vec![0u8; 512];
        let (len, _) = client.recv_from(&mut buf).await.unwrap();

        assert!(len > 12, "Response should have at least header");
        assert_eq!(buf[0..2], query[0..2], "Transaction ID should match");
        assert_eq!(buf[2] & 0x80, 0x80, "QR bit should be set (response)");
        assert_eq!(buf[3] & 0x0f, RCODE_NOERROR);
        assert_eq!(server.query_count(), 1);
    }

    #[test]
    fn test_parse_question_reads_name_and_type() {
        let mut query = vec![0xab, 0xcd, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        query.extend(encode_name("WWW.Example.com"));
        query.extend_from_slice(&[0x01, 0x01, 0x00, 0x01]);

        let question = parse_question(&query).unwrap();
        assert_eq!(question.name, "www.example.com.");
        assert_eq!(question.qtype, TYPE_CAA);
        assert!(!question.dnssec_ok);
    }
}
