//! Structured inputs shared by the fuzz targets and the corpus generator.
use arbitrary::Arbitrary;
use bgpkit_codec::models::*;
use ipnet::{IpNet, Ipv4Net};
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

/// Raw material for a message; [FuzzMessage::into_message] turns it into one that is valid
/// to encode.
#[derive(Debug, Arbitrary)]
pub enum FuzzMessage {
    Open {
        asn: u16,
        hold_time: u16,
        router_id: u32,
        capabilities: Vec<(u8, Vec<u8>)>,
    },
    Update {
        withdrawn: Vec<(u32, u8)>,
        attributes: Vec<(u16, Vec<u8>)>,
        announced: Vec<(u32, u8)>,
    },
    Notification {
        code: u16,
        data: Vec<u8>,
    },
    KeepAlive,
}

fn to_prefixes(raw: Vec<(u32, u8)>) -> Vec<IpNet> {
    raw.into_iter()
        .filter_map(|(addr, len)| Ipv4Net::new(Ipv4Addr::from(addr), len % 33).ok())
        .map(|net| IpNet::V4(net.trunc()))
        .collect()
}

impl FuzzMessage {
    pub fn into_message(self) -> BgpMessage {
        match self {
            FuzzMessage::Open {
                asn,
                hold_time,
                router_id,
                capabilities,
            } => {
                let mut total = 0;
                let capabilities = capabilities
                    .into_iter()
                    .map(|(code, mut value)| {
                        value.truncate(u8::MAX as usize);
                        Capability::new(code, value)
                    })
                    .take_while(|cap| {
                        total += 2 + cap.value.len();
                        total <= 253
                    })
                    .collect();
                BgpMessage::Open(BgpOpenMessage {
                    asn: asn.max(1),
                    hold_time: Duration::from_secs(match hold_time {
                        1 | 2 => 3,
                        t => t as u64,
                    }),
                    router_id: Some(IpAddr::V4(Ipv4Addr::from(router_id))),
                    capabilities,
                })
            }
            FuzzMessage::Update {
                withdrawn,
                attributes,
                announced,
            } => BgpMessage::Update(BgpUpdateMessage {
                withdrawn_prefixes: to_prefixes(withdrawn),
                attributes: attributes
                    .into_iter()
                    .map(|(code, mut value)| {
                        match code & EXTENDED_LENGTH_BIT {
                            0 => value.truncate(u8::MAX as usize),
                            _ => value.truncate(u16::MAX as usize),
                        }
                        Attribute::new(code, value)
                    })
                    .collect(),
                announced_prefixes: to_prefixes(announced),
            }),
            FuzzMessage::Notification { code, data } => {
                BgpMessage::Notification(BgpNotificationMessage { code, data })
            }
            FuzzMessage::KeepAlive => BgpMessage::KeepAlive(BgpKeepAliveMessage {}),
        }
    }
}

fn net(s: &str) -> IpNet {
    s.parse().expect("valid prefix")
}

/// Hand-picked messages covering each type, used as seeds.
pub fn seed_messages() -> Vec<BgpMessage> {
    let router_id = Some(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)));
    vec![
        BgpMessage::KeepAlive(BgpKeepAliveMessage {}),
        BgpMessage::Open(BgpOpenMessage {
            asn: 1234,
            hold_time: Duration::from_secs(42),
            router_id,
            capabilities: vec![],
        }),
        BgpMessage::Open(BgpOpenMessage {
            asn: AS_TRANS,
            hold_time: Duration::from_secs(180),
            router_id,
            capabilities: vec![
                Capability::new(1, vec![0, 1, 0, 1]),
                Capability::new(2, vec![]),
                Capability::four_octet_asn(4_200_000_000),
            ],
        }),
        BgpMessage::Notification(BgpNotificationMessage::new(6, 2, vec![])),
        BgpMessage::Notification(BgpNotificationMessage {
            code: 771,
            data: (0..17).collect(),
        }),
        BgpMessage::Update(BgpUpdateMessage {
            withdrawn_prefixes: vec![net("10.0.0.0/24")],
            attributes: vec![Attribute::new(5, vec![1, 2, 3])],
            announced_prefixes: vec![net("192.168.1.0/25")],
        }),
        BgpMessage::Update(BgpUpdateMessage {
            withdrawn_prefixes: vec![],
            attributes: vec![
                Attribute::origin(Origin::IGP),
                Attribute::as_sequence(&[64512, 4_200_000_000], true),
                Attribute::next_hop(Ipv4Addr::new(192, 0, 2, 1)),
                Attribute::communities(&[0xfde8_0001, 0xfde8_0002]),
            ],
            announced_prefixes: vec![
                net("0.0.0.0/0"),
                net("203.0.113.0/24"),
                net("198.51.100.7/32"),
            ],
        }),
    ]
}
