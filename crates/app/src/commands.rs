//! One handler per subcommand. Handlers call the engine and print; no
//! portfolio rule lives here.

use engine::{
    Engine, Holding, Loan, Sale, Snapshot, SnapshotComparison, Stake, StaticPrices, Summary,
    compare_snapshots,
};
use serde::Serialize;

use crate::{
    cli::{
        Command, LoanCommand, PriceArgs, SnapshotCommand, StakeCommand, TradeArgs, TradeCommand,
    },
    error::{AppError, Result},
    settings::Settings,
};

pub struct Context<'a> {
    pub engine: &'a Engine,
    pub settings: &'a Settings,
    pub json: bool,
}

impl Context<'_> {
    /// Print `value` as JSON, or with `render` otherwise.
    fn emit<T: Serialize + ?Sized>(&self, value: &T, render: impl FnOnce(&T)) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            render(value);
        }
        Ok(())
    }

    fn removed(&self, kind: &str, id: &str, removed: bool) -> Result<()> {
        if !removed {
            return Err(AppError::NotFound(format!("{kind} {id} not found")));
        }
        if !self.json {
            println!("Removed {kind} {id}");
        }
        Ok(())
    }
}

pub fn run(ctx: &Context<'_>, command: Command) -> Result<()> {
    match command {
        Command::Buy { command } => buy(ctx, command),
        Command::Sell { command } => sell(ctx, command),
        Command::Loan { command } => loan(ctx, command),
        Command::Stake { command } => stake(ctx, command),
        Command::Summary => summary(ctx),
        Command::Snapshot { command } => snapshot(ctx, command),
    }
}

fn trade_platform(ctx: &Context<'_>, args: &TradeArgs) -> Option<String> {
    args.platform
        .clone()
        .or_else(|| ctx.settings.default_platform.clone())
}

fn buy(ctx: &Context<'_>, command: TradeCommand) -> Result<()> {
    match command {
        TradeCommand::Add(args) => {
            let platform = trade_platform(ctx, &args);
            let holding = ctx.engine.add_holding(
                &args.coin,
                args.amount,
                args.price,
                platform.as_deref(),
                args.common.notes.as_deref(),
                args.common.date.as_deref(),
            )?;
            ctx.emit(&holding, |h| {
                println!(
                    "Added holding {}: {} {} @ {} (total {})",
                    h.id,
                    h.amount,
                    h.coin,
                    usd(h.purchase_price_usd),
                    usd(h.total_value_usd())
                );
            })
        }
        TradeCommand::List => ctx.emit(ctx.engine.holdings().as_slice(), print_holdings),
        TradeCommand::Remove { id } => {
            let removed = ctx.engine.remove_holding(&id)?;
            ctx.removed("holding", &id, removed)
        }
    }
}

fn sell(ctx: &Context<'_>, command: TradeCommand) -> Result<()> {
    match command {
        TradeCommand::Add(args) => {
            let platform = trade_platform(ctx, &args);
            let sale = ctx.engine.add_sale(
                &args.coin,
                args.amount,
                args.price,
                platform.as_deref(),
                args.common.notes.as_deref(),
                args.common.date.as_deref(),
            )?;
            ctx.emit(&sale, |s| {
                println!(
                    "Added sale {}: {} {} @ {} (total {})",
                    s.id,
                    s.amount,
                    s.coin,
                    usd(s.sell_price_usd),
                    usd(s.total_value_usd())
                );
            })
        }
        TradeCommand::List => ctx.emit(ctx.engine.sales().as_slice(), print_sales),
        TradeCommand::Remove { id } => {
            let removed = ctx.engine.remove_sale(&id)?;
            ctx.removed("sale", &id, removed)
        }
    }
}

fn loan(ctx: &Context<'_>, command: LoanCommand) -> Result<()> {
    match command {
        LoanCommand::Add(args) => {
            let loan = ctx.engine.add_loan(
                &args.coin,
                args.amount,
                &args.platform,
                args.rate,
                args.common.notes.as_deref(),
                args.common.date.as_deref(),
            )?;
            ctx.emit(&loan, |l| {
                println!(
                    "Added loan {}: {} {} on {}",
                    l.id, l.amount, l.coin, l.platform
                );
            })
        }
        LoanCommand::List => ctx.emit(ctx.engine.loans().as_slice(), print_loans),
        LoanCommand::Remove { id } => {
            let removed = ctx.engine.remove_loan(&id)?;
            ctx.removed("loan", &id, removed)
        }
    }
}

fn stake(ctx: &Context<'_>, command: StakeCommand) -> Result<()> {
    match command {
        StakeCommand::Add(args) => {
            let stake = ctx.engine.add_stake(
                &args.coin,
                args.amount,
                &args.platform,
                args.apy,
                args.common.notes.as_deref(),
                args.common.date.as_deref(),
            )?;
            ctx.emit(&stake, |s| {
                println!(
                    "Added stake {}: {} {} on {}",
                    s.id, s.amount, s.coin, s.platform
                );
            })
        }
        StakeCommand::List => ctx.emit(ctx.engine.stakes().as_slice(), print_stakes),
        StakeCommand::Remove { id } => {
            let removed = ctx.engine.remove_stake(&id)?;
            ctx.removed("stake", &id, removed)
        }
    }
}

fn summary(ctx: &Context<'_>) -> Result<()> {
    ctx.emit(&ctx.engine.summary(), print_summary)
}

fn oracle(prices: PriceArgs) -> Result<StaticPrices> {
    Ok(StaticPrices::from_pairs(prices.prices)?)
}

fn snapshot(ctx: &Context<'_>, command: SnapshotCommand) -> Result<()> {
    match command {
        SnapshotCommand::Save { note, prices } => {
            let snapshot = ctx.engine.save_snapshot_with(&oracle(prices)?, &note)?;
            ctx.emit(&snapshot, |s| {
                println!("Saved snapshot {}", s.id);
                print_snapshot_totals(s);
            })
        }
        SnapshotCommand::Daily { prices } => {
            let note = chrono::Local::now().format("%Y-%m-%d").to_string();
            let snapshot = ctx.engine.save_snapshot_with(&oracle(prices)?, &note)?;
            ctx.emit(&snapshot, |s| {
                println!("Saved daily snapshot {} ({})", s.id, s.note);
                print_snapshot_totals(s);
            })
        }
        SnapshotCommand::List => ctx.emit(ctx.engine.snapshots().as_slice(), print_snapshots),
        SnapshotCommand::Show { id } => {
            let snapshot = find_snapshot(ctx.engine, &id)?;
            ctx.emit(&snapshot, print_snapshot)
        }
        SnapshotCommand::Compare { id, other, prices } => {
            let first = find_snapshot(ctx.engine, &id)?;
            let second = match other {
                Some(other) => find_snapshot(ctx.engine, &other)?,
                None => ctx.engine.snapshot_with(&oracle(prices)?, "now")?,
            };
            let (older, newer) = Snapshot::chronological(&first, &second);
            ctx.emit(&compare_snapshots(older, newer), print_comparison)
        }
        SnapshotCommand::Remove { id } => {
            let removed = ctx.engine.remove_snapshot(&id)?;
            ctx.removed("snapshot", &id, removed)
        }
    }
}

fn find_snapshot(engine: &Engine, id: &str) -> Result<Snapshot> {
    engine
        .snapshot(id)
        .ok_or_else(|| AppError::NotFound(format!("snapshot {id} not found")))
}

/// `1234.5` as `$1,234.50`.
pub fn usd(amount: f64) -> String {
    let cents = format!("{:.2}", amount.abs());
    let (whole, fraction) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 && cents != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{fraction}")
}

/// `usd` with an explicit `+` on gains.
fn signed_usd(amount: f64) -> String {
    if amount >= 0.0 {
        format!("+{}", usd(amount))
    } else {
        usd(amount)
    }
}

fn print_holdings(holdings: &[Holding]) {
    if holdings.is_empty() {
        println!("No holdings recorded.");
        return;
    }
    println!(
        "{:<12}  {:<10}  {:<6}  {:>14}  {:>14}  {:>16}  PLATFORM",
        "ID", "DATE", "COIN", "AMOUNT", "PRICE", "TOTAL"
    );
    for h in holdings {
        println!(
            "{:<12}  {:<10}  {:<6}  {:>14}  {:>14}  {:>16}  {}",
            h.id,
            h.date,
            h.coin,
            h.amount,
            usd(h.purchase_price_usd),
            usd(h.total_value_usd()),
            h.platform.as_deref().unwrap_or("-")
        );
    }
}

fn print_sales(sales: &[Sale]) {
    if sales.is_empty() {
        println!("No sales recorded.");
        return;
    }
    println!(
        "{:<12}  {:<10}  {:<6}  {:>14}  {:>14}  {:>16}  PLATFORM",
        "ID", "DATE", "COIN", "AMOUNT", "PRICE", "TOTAL"
    );
    for s in sales {
        println!(
            "{:<12}  {:<10}  {:<6}  {:>14}  {:>14}  {:>16}  {}",
            s.id,
            s.date,
            s.coin,
            s.amount,
            usd(s.sell_price_usd),
            usd(s.total_value_usd()),
            s.platform.as_deref().unwrap_or("-")
        );
    }
}

fn print_loans(loans: &[Loan]) {
    if loans.is_empty() {
        println!("No loans recorded.");
        return;
    }
    println!(
        "{:<12}  {:<10}  {:<6}  {:>14}  {:>8}  PLATFORM",
        "ID", "DATE", "COIN", "AMOUNT", "RATE"
    );
    for l in loans {
        let rate = l
            .interest_rate
            .map_or_else(|| "-".to_string(), |r| format!("{r}%"));
        println!(
            "{:<12}  {:<10}  {:<6}  {:>14}  {:>8}  {}",
            l.id, l.date, l.coin, l.amount, rate, l.platform
        );
    }
}

fn print_stakes(stakes: &[Stake]) {
    if stakes.is_empty() {
        println!("No stakes recorded.");
        return;
    }
    println!(
        "{:<12}  {:<10}  {:<6}  {:>14}  {:>8}  PLATFORM",
        "ID", "DATE", "COIN", "AMOUNT", "APY"
    );
    for s in stakes {
        let apy = s.apy.map_or_else(|| "-".to_string(), |r| format!("{r}%"));
        println!(
            "{:<12}  {:<10}  {:<6}  {:>14}  {:>8}  {}",
            s.id, s.date, s.coin, s.amount, apy, s.platform
        );
    }
}

fn print_summary(summary: &Summary) {
    println!(
        "Records: {} holdings, {} sales, {} loans, {} stakes",
        summary.total_holdings_count,
        summary.total_sales_count,
        summary.total_loans_count,
        summary.total_stakes_count
    );
    println!("Total invested: {}", usd(summary.total_invested_usd));
    println!("Total sold:     {}", usd(summary.total_sold_usd));

    let coins: std::collections::BTreeSet<&String> = summary
        .holdings_by_coin
        .keys()
        .chain(summary.loans_by_coin.keys())
        .chain(summary.stakes_by_coin.keys())
        .collect();
    if coins.is_empty() {
        return;
    }
    let amount = |map: &engine::aggregate::CoinAmounts, coin: &String| {
        map.get(coin).copied().unwrap_or(0.0)
    };
    println!();
    println!(
        "{:<6}  {:>14}  {:>14}  {:>14}  {:>14}  {:>14}",
        "COIN", "HOLDINGS", "STAKED", "AVAILABLE", "LOANS", "NET"
    );
    for coin in coins {
        println!(
            "{:<6}  {:>14}  {:>14}  {:>14}  {:>14}  {:>14}",
            coin,
            amount(&summary.holdings_by_coin, coin),
            amount(&summary.stakes_by_coin, coin),
            amount(&summary.available_by_coin, coin),
            amount(&summary.loans_by_coin, coin),
            amount(&summary.net_by_coin, coin)
        );
    }
}

fn print_snapshot_totals(snapshot: &Snapshot) {
    println!("  Net value:    {}", usd(snapshot.net_value));
    println!(
        "  Profit/loss:  {} ({:.1}%)",
        signed_usd(snapshot.profit_loss),
        snapshot.profit_percent
    );
}

fn print_snapshots(snapshots: &[Snapshot]) {
    if snapshots.is_empty() {
        println!("No snapshots saved.");
        return;
    }
    println!(
        "{:<12}  {:<16}  {:>16}  {:>16}  NOTE",
        "ID", "TAKEN", "NET VALUE", "PROFIT/LOSS"
    );
    for s in snapshots {
        println!(
            "{:<12}  {:<16}  {:>16}  {:>16}  {}",
            s.id,
            s.timestamp.format("%Y-%m-%d %H:%M"),
            usd(s.net_value),
            signed_usd(s.profit_loss),
            s.note
        );
    }
}

fn print_snapshot(snapshot: &Snapshot) {
    println!("Snapshot {}", snapshot.id);
    println!("  Taken:          {}", snapshot.timestamp.to_rfc3339());
    if !snapshot.note.is_empty() {
        println!("  Note:           {}", snapshot.note);
    }
    println!("  Holdings value: {}", usd(snapshot.holdings_value));
    println!("  Loans value:    {}", usd(snapshot.loans_value));
    println!("  Total invested: {}", usd(snapshot.total_invested));
    println!("  Total sold:     {}", usd(snapshot.total_sold));
    print_snapshot_totals(snapshot);

    if snapshot.coin_values.is_empty() {
        return;
    }
    println!();
    println!(
        "{:<6}  {:>14}  {:>14}  {:>16}",
        "COIN", "AMOUNT", "PRICE", "VALUE"
    );
    for (coin, value) in &snapshot.coin_values {
        println!(
            "{:<6}  {:>14}  {:>14}  {:>16}",
            coin,
            value.amount,
            usd(value.price),
            usd(value.value)
        );
    }
}

fn print_comparison(cmp: &SnapshotComparison) {
    println!("Comparing {} -> {}", cmp.older_id, cmp.newer_id);
    println!(
        "  Net value:    {} ({:+.1}%)",
        signed_usd(cmp.net_value_change),
        cmp.net_value_percent
    );
    println!("  Profit/loss:  {}", signed_usd(cmp.profit_loss_change));

    if cmp.coin_changes.is_empty() {
        return;
    }
    println!();
    println!(
        "{:<6}  {:>14}  {:>14}  {:>16}  {:>16}  {:>16}",
        "COIN", "OLD AMOUNT", "NEW AMOUNT", "OLD VALUE", "NEW VALUE", "CHANGE"
    );
    for (coin, change) in &cmp.coin_changes {
        println!(
            "{:<6}  {:>14}  {:>14}  {:>16}  {:>16}  {:>16}",
            coin,
            change.old_amount,
            change.new_amount,
            usd(change.old_value),
            usd(change.new_value),
            signed_usd(change.value_change)
        );
    }
}
