//! Integration tests for the TCP transport.
//!
//! These tests bind a real listener on an OS-assigned port and drive it
//! with a plain `tokio::net::TcpStream` client.

#[cfg(feature = "tcp")]
mod tcp {
    use lanchat_transport::{
        Connection, TcpConnection, TcpTransport, Transport, TransportError,
    };
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    /// Binds a transport on `127.0.0.1:0`, connects one client, and
    /// returns both ends.
    async fn connected_pair() -> (TcpConnection, TcpStream) {
        let mut transport = TcpTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = transport.local_addr().expect("should have local addr");

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let client = TcpStream::connect(addr).await.expect("should connect");
        let server_conn = server_handle.await.expect("task should complete");
        (server_conn, client)
    }

    #[tokio::test]
    async fn test_tcp_accept_and_send_receive() {
        let (server_conn, mut client) = connected_pair().await;

        assert!(server_conn.id().into_inner() > 0);

        // --- Server sends, client receives ---
        server_conn
            .send(b"hello from server\n")
            .await
            .expect("send should succeed");

        let mut buf = [0u8; 18];
        client.read_exact(&mut buf).await.expect("client read");
        assert_eq!(&buf, b"hello from server\n");

        // --- Client sends, server receives ---
        client.write_all(b"hello from client").await.unwrap();

        let received = server_conn
            .recv()
            .await
            .expect("recv should succeed")
            .expect("should have data");
        assert_eq!(received, b"hello from client");
    }

    #[tokio::test]
    async fn test_tcp_recv_returns_none_on_client_close() {
        let (server_conn, client) = connected_pair().await;

        drop(client);

        let result = server_conn.recv().await.expect("recv should not error");
        assert!(result.is_none(), "should return None on client close");
    }

    #[tokio::test]
    async fn test_tcp_close_delivers_eof_after_pending_data() {
        let (server_conn, mut client) = connected_pair().await;

        server_conn.send(b"bye\n").await.unwrap();
        server_conn.close().await.expect("close should succeed");

        let mut received = Vec::new();
        client
            .read_to_end(&mut received)
            .await
            .expect("read to EOF");
        assert_eq!(received, b"bye\n");
    }

    #[tokio::test]
    async fn test_tcp_connection_ids_are_unique() {
        let (a, _client_a) = connected_pair().await;
        let (b, _client_b) = connected_pair().await;
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn test_tcp_accept_after_shutdown_returns_error() {
        let mut transport = TcpTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        transport.shutdown().await.expect("shutdown");

        let result = transport.accept().await;
        assert!(matches!(result, Err(TransportError::Shutdown)));
    }

    #[tokio::test]
    async fn test_tcp_bind_to_invalid_address_fails() {
        let result = TcpTransport::bind("not-an-address").await;
        assert!(matches!(result, Err(TransportError::BindFailed { .. })));
    }
}
