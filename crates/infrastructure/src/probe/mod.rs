pub mod tcp_connector;

pub use tcp_connector::TcpPortConnector;
