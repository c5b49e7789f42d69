use anyhow::Context;

fn main() -> anyhow::Result<()> {
    shopper_orders_lib::run().context("shopper-orders demo failed")?;
    Ok(())
}
