//! Example walking through the OTP lifecycle against a live Redis
//!
//! Run with: REDIS_URL=redis://127.0.0.1:6379 cargo run -p otp_infra --example otp_redis_demo

use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = otp_infra::load_config()?;
    otp_shared::init_tracing(&config.logging)
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing: {}", e))?;

    println!("OTP Redis Demo");
    println!("==============\n");

    let services = otp_infra::initialize_with(config)
        .await
        .context("failed to initialise infrastructure")?;
    let manager = &services.otp_manager;

    if !services.redis_client.health_check().await? {
        anyhow::bail!("Redis health check failed");
    }
    println!("✓ Redis connection established\n");

    let subject_id = 42;

    if manager.can_resend_otp(subject_id).await? {
        let code = manager.generate_and_store_otp(subject_id).await?;
        println!("Issued code {} for subject {}", code, subject_id);

        println!("Resend allowed right away: {}", manager.can_resend_otp(subject_id).await?);
        let wait = manager.resend_available_in(subject_id).await?;
        println!("Resend available in {}s", wait.as_secs());

        println!("Wrong code accepted: {}", manager.is_otp_valid(subject_id, "WRONG").await?);
        println!("Correct code accepted: {}", manager.is_otp_valid(subject_id, &code).await?);
    } else {
        let wait = manager.resend_available_in(subject_id).await?;
        println!("A fresh code is already live; retry in {}s", wait.as_secs());
    }

    manager.delete_otp(subject_id).await?;
    println!("\nState after delete: {:?}", manager.otp_state(subject_id).await?);

    Ok(())
}
