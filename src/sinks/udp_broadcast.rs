//! UDP broadcast emitter for sensor records
//!
//! Every record goes out as exactly one datagram addressed to the subnet
//! broadcast address. Delivery is best-effort: there is no acknowledgment,
//! retry, or fragmentation, and a failed send only affects that record.
//!
//! # Wire Format
//!
//! The datagram payload is the raw record bytes with no length prefix and no
//! line terminator:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ Record bytes (< 65507 bytes) │
//! └──────────────────────────────┘
//! ```

use super::RecordSink;
use crate::config::BroadcastConfig;
use crate::error::{Error, Result};
use crate::record::Record;
use std::net::{SocketAddr, UdpSocket};

/// UDP payload limit over IPv4 (65535 - 8 byte UDP header - 20 byte IP header)
///
/// Records at or above this size are rejected without touching the socket.
pub const MAX_DATAGRAM_SIZE: usize = 65_507;

/// Sends records as UDP broadcast datagrams
pub struct UdpBroadcaster {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpBroadcaster {
    /// Bind the wildcard address and enable broadcast sends
    pub fn open(config: &BroadcastConfig) -> Result<Self> {
        let socket = UdpSocket::bind(config.bind_address).map_err(|e| {
            Error::Other(format!(
                "Failed to bind UDP socket on {}: {}",
                config.bind_address, e
            ))
        })?;
        socket
            .set_broadcast(true)
            .map_err(|e| Error::Other(format!("Failed to enable UDP broadcast: {}", e)))?;

        let target = config.target();
        log::info!(
            "UDP broadcast enabled: {} -> {}",
            socket.local_addr()?,
            target
        );

        Ok(Self { socket, target })
    }

    /// Destination every datagram is sent to
    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Send the record as a single datagram, returns bytes sent
    pub fn send(&self, record: &Record) -> Result<usize> {
        let payload = record.as_bytes();
        if payload.len() >= MAX_DATAGRAM_SIZE {
            return Err(Error::Send {
                target: self.target,
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!(
                        "record of {} bytes reaches {} byte datagram limit",
                        payload.len(),
                        MAX_DATAGRAM_SIZE
                    ),
                ),
            });
        }

        let sent = self
            .socket
            .send_to(payload, self.target)
            .map_err(|source| Error::Send {
                target: self.target,
                source,
            })?;

        log::trace!("Sent {} bytes to {}", sent, self.target);
        Ok(sent)
    }
}

impl RecordSink for UdpBroadcaster {
    fn name(&self) -> &'static str {
        "broadcast"
    }

    fn accept(&mut self, record: &Record) -> Result<()> {
        self.send(record).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::time::Duration;

    /// Loopback receiver plus a broadcaster aimed at it
    fn loopback_pair() -> (UdpSocket, UdpBroadcaster) {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        receiver
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();

        let config = BroadcastConfig {
            bind_address: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
            address: Ipv4Addr::LOCALHOST,
            port: receiver.local_addr().unwrap().port(),
        };
        (receiver, UdpBroadcaster::open(&config).unwrap())
    }

    #[test]
    fn test_open_enables_broadcast() {
        let (_receiver, broadcaster) = loopback_pair();
        assert!(broadcaster.socket.broadcast().unwrap());
        assert_ne!(broadcaster.socket.local_addr().unwrap().port(), 0);
    }

    #[test]
    fn test_send_raw_payload() {
        let (receiver, broadcaster) = loopback_pair();

        let sent = broadcaster.send(&Record::from("T=21.5,H=40\n")).unwrap();
        assert_eq!(sent, 11);

        let mut buf = [0u8; 64];
        let (n, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"T=21.5,H=40");
    }

    #[test]
    fn test_empty_record_sends_empty_datagram() {
        let (receiver, mut broadcaster) = loopback_pair();

        broadcaster.accept(&Record::from("\n")).unwrap();

        let mut buf = [0u8; 16];
        let (n, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn test_oversized_record_is_send_error() {
        let (_receiver, broadcaster) = loopback_pair();
        let record = Record::from(vec![b'x'; MAX_DATAGRAM_SIZE + 1].as_slice());

        let err = broadcaster.send(&record).unwrap_err();
        assert!(matches!(err, Error::Send { .. }));
    }

    #[test]
    fn test_record_at_limit_is_send_error() {
        let (_receiver, broadcaster) = loopback_pair();
        let record = Record::from(vec![b'x'; MAX_DATAGRAM_SIZE].as_slice());

        match broadcaster.send(&record) {
            Err(Error::Send { target, source }) => {
                assert_eq!(target, broadcaster.target());
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidInput);
            }
            other => panic!("expected send error, got {:?}", other),
        }
    }

    #[test]
    fn test_record_below_limit_is_sent() {
        let (receiver, broadcaster) = loopback_pair();
        let record = Record::from(vec![b'x'; MAX_DATAGRAM_SIZE - 1].as_slice());

        assert_eq!(broadcaster.send(&record).unwrap(), MAX_DATAGRAM_SIZE - 1);

        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        let (n, _) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(n, MAX_DATAGRAM_SIZE - 1);
    }
}
