//! Sealcast demo publisher.
//!
//! Publishes messages from several threads through one topic publisher into an
//! in-process channel, while a receiver task opens every frame.
//!
//! # Usage
//!
//! ```bash
//! # Encrypted topic, 4 publishing threads
//! sealcast-demo --topic market.prices --messages 10000
//!
//! # Plaintext topic
//! sealcast-demo --topic market.prices --plain
//! ```

use std::sync::Arc;

use clap::Parser;
use sealcast_crypto::{Entropy, OsEntropy};
use sealcast_proto::{PublishOutcome, PublisherId};
use sealcast_publisher::{PublisherConfig, SecurityConfig, TopicPublisher};
use sealcast_transport::{ChannelTransport, channel, open_frame};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Sealcast demo publisher
#[derive(Parser, Debug)]
#[command(name = "sealcast-demo")]
#[command(about = "Publish messages on a topic through an in-process channel")]
#[command(version)]
struct Args {
    /// Topic to publish on
    #[arg(short, long, default_value = "demo.topic")]
    topic: String,

    /// Messages per publishing thread
    #[arg(short, long, default_value = "1000")]
    messages: usize,

    /// Number of threads sharing the publisher
    #[arg(long, default_value = "4")]
    threads: usize,

    /// Publish plaintext instead of encrypting
    #[arg(long)]
    plain: bool,

    /// Frames the channel holds before reporting back-pressure (at least 1)
    #[arg(long, default_value = "1024")]
    capacity: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Per-thread send statistics.
#[derive(Debug, Default, Clone, Copy)]
struct BatchStats {
    sent: usize,
    back_pressured: usize,
    failed: usize,
}

impl BatchStats {
    fn merge(&mut self, other: Self) {
        self.sent += other.sent;
        self.back_pressured += other.back_pressured;
        self.failed += other.failed;
    }
}

fn publish_batch(
    publisher: &TopicPublisher<ChannelTransport>,
    thread: usize,
    count: usize,
) -> BatchStats {
    let mut stats = BatchStats::default();

    for seq in 0..count {
        let message = format!("thread {thread} message {seq}");
        loop {
            match publisher.send(message.as_bytes(), 0, message.len()) {
                Ok(PublishOutcome::Success) => {
                    stats.sent += 1;
                    break;
                },
                Ok(PublishOutcome::NotSent) => {
                    stats.back_pressured += 1;
                    std::thread::yield_now();
                },
                Ok(PublishOutcome::UnexpectedError) => {
                    stats.failed += 1;
                    break;
                },
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(thread, seq, error = %e, "Send rejected");
                    stats.failed += 1;
                    break;
                },
                Err(e) => {
                    tracing::error!(thread, error = %e, "Publisher unusable, stopping thread");
                    return stats;
                },
            }
        }
    }

    stats
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = if args.plain {
        PublisherConfig::plain(&args.topic)
    } else {
        tracing::info!("Encrypting topic with a fresh session key");
        PublisherConfig::secure(&args.topic, SecurityConfig::new("demo"))
    };

    let mut raw_id = [0u8; 16];
    OsEntropy.fill(&mut raw_id)?;

    let (transport, mut frames) = channel(args.capacity);
    let publisher =
        Arc::new(TopicPublisher::new(PublisherId::from_bytes(raw_id), config, transport)?);
    let key = publisher.session_key()?;

    let receiver = tokio::spawn(async move {
        let (mut opened, mut rejected) = (0usize, 0usize);
        while let Some(frame) = frames.recv().await {
            match open_frame(&frame, key.as_ref()) {
                Ok(_) => opened += 1,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to open frame");
                    rejected += 1;
                },
            }
        }
        (opened, rejected)
    });

    let mut workers = Vec::with_capacity(args.threads);
    for thread in 0..args.threads {
        let publisher = Arc::clone(&publisher);
        let count = args.messages;
        workers
            .push(tokio::task::spawn_blocking(move || publish_batch(&publisher, thread, count)));
    }

    let mut totals = BatchStats::default();
    for worker in workers {
        totals.merge(worker.await?);
    }

    publisher.close();
    // Dropping the last handle drops the transport and ends the receiver.
    drop(publisher);
    let (opened, rejected) = receiver.await?;

    tracing::info!(
        topic = %args.topic,
        sent = totals.sent,
        back_pressured = totals.back_pressured,
        failed = totals.failed,
        opened,
        rejected,
        "Demo finished"
    );

    Ok(())
}
