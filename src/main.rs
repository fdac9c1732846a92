use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{anyhow, bail};
use snf_portfolio::app::create_app;
use snf_portfolio::config::ClientConfig;
use snf_portfolio::logging::{init_logging, LoggingConfig};
use snf_portfolio::routes::Route;
use snf_portfolio::screens::{
    AddInvestmentScreen, DashboardScreen, EditInvestmentScreen, InvestmentForm,
};
use snf_portfolio::services::portfolio_service::{format_money, CategoryFilter};
use snf_portfolio::services::ToastVariant;
use snf_portfolio::session::{resolve_session, SessionState, StaticIdentityProvider};
use snf_portfolio::state::AppState;

const USAGE: &str = "usage: snf-portfolio <command>

commands:
  list [all|stock|etf|crypto]
  show <id>
  add <name> <symbol> <type> <price> <quantity>
  edit <id> <name> <symbol> <type> <price> <quantity>
  delete <id>
  me";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env();
    init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))?;

    let identity = Arc::new(StaticIdentityProvider::from_config(&config));
    let app = create_app(&config, identity)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("list") => list(&app, args.get(1).map(String::as_str)).await?,
        Some("show") => show(&app, &args[1..]).await?,
        Some("add") => add(&app, &args[1..]).await?,
        Some("edit") => edit(&app, &args[1..]).await?,
        Some("delete") => delete(&app, &args[1..]).await?,
        Some("me") => me(&app).await,
        Some("help") | Some("--help") | Some("-h") => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some(other) => bail!("unknown command '{}'\n\n{}", other, USAGE),
    }

    if app.navigator.current() == Some(Route::Login) {
        eprintln!("Not signed in. Set SNF_ID_TOKEN to use the portfolio API.");
        std::process::exit(1);
    }

    let failed = print_toasts(&app);
    if failed {
        std::process::exit(1);
    }
    Ok(())
}

async fn list(app: &AppState, filter: Option<&str>) -> anyhow::Result<()> {
    let filter = match filter {
        Some(raw) => CategoryFilter::parse(raw)
            .ok_or_else(|| anyhow!("unknown category '{}', expected all, stock, etf or crypto", raw))?,
        None => CategoryFilter::All,
    };

    let mut screen = DashboardScreen::new(app.clone());
    screen.mount().await;
    if screen.user().is_none() {
        return Ok(());
    }
    screen.set_filter(filter);
    print_dashboard(&screen);
    Ok(())
}

async fn show(app: &AppState, args: &[String]) -> anyhow::Result<()> {
    let [id] = args else {
        bail!("show expects <id>\n\n{}", USAGE);
    };
    let mut screen = EditInvestmentScreen::new(app.clone(), id.as_str());
    screen.mount().await;
    if let Some(inv) = screen.investment() {
        println!("{}", inv.display_name());
        println!("  id:        {}", inv.id.as_deref().unwrap_or("-"));
        println!("  type:      {}", inv.kind.label());
        println!("  price:     {}", format_money(inv.price));
        println!("  quantity:  {}", inv.quantity);
        println!("  value:     {}", format_money(inv.value));
        if let Some(date) = inv.purchase_date {
            println!("  purchased: {}", date.to_rfc3339());
        }
    }
    Ok(())
}

fn form_from(args: &[String]) -> anyhow::Result<InvestmentForm> {
    let [name, symbol, kind, price, quantity] = args else {
        bail!("expected <name> <symbol> <type> <price> <quantity>\n\n{}", USAGE);
    };
    Ok(InvestmentForm {
        name: name.clone(),
        symbol: symbol.clone(),
        kind: kind.clone(),
        price: price.clone(),
        quantity: quantity.clone(),
    })
}

async fn add(app: &AppState, args: &[String]) -> anyhow::Result<()> {
    let form = form_from(args)?;
    let mut screen = AddInvestmentScreen::new(app.clone());
    screen.mount().await;
    screen.form = form;
    screen.submit().await;
    Ok(())
}

async fn edit(app: &AppState, args: &[String]) -> anyhow::Result<()> {
    let Some((id, rest)) = args.split_first() else {
        bail!("edit expects <id> <name> <symbol> <type> <price> <quantity>\n\n{}", USAGE);
    };
    let form = form_from(rest)?;
    let mut screen = EditInvestmentScreen::new(app.clone(), id.as_str());
    screen.mount().await;
    screen.form = form;
    screen.submit().await;
    Ok(())
}

async fn delete(app: &AppState, args: &[String]) -> anyhow::Result<()> {
    let [id] = args else {
        bail!("delete expects <id>\n\n{}", USAGE);
    };
    let mut screen = DashboardScreen::new(app.clone());
    screen.mount().await;
    if screen.user().is_none() {
        return Ok(());
    }

    let Some(confirmation) = screen.request_delete(id) else {
        bail!("no investment with id '{}'", id);
    };
    println!("{}", confirmation.title);
    print!("{} [y/N] ", confirmation.description);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    if answer.trim().eq_ignore_ascii_case("y") {
        screen.confirm_delete().await;
    } else {
        screen.cancel_delete();
        println!("Cancelled.");
    }
    Ok(())
}

async fn me(app: &AppState) {
    match resolve_session(app.identity.as_ref()).await {
        SessionState::Anonymous => app.navigator.push(Route::Login),
        SessionState::Authenticated(identity) => match app.users.current().await {
            Ok(user) => {
                println!("{} <{}>", user.name, user.email);
                println!("  id: {}", user.id);
            }
            Err(e) => {
                app.notifier.error(&e, "Failed to fetch user");
                println!("Signed in as {}", identity.label());
            }
        },
    }
}

fn print_dashboard(screen: &DashboardScreen) {
    if let Some(user) = screen.user() {
        println!("Signed in as {}", user.label());
    }
    println!();
    println!("Total Portfolio Value  {}", format_money(screen.total_value()));
    println!("  {}", screen.total_value_caption());
    println!("Total Assets           {}", screen.investments().len());
    println!("  {}", screen.type_counts().summary());
    println!();

    let filter = screen.filter();
    println!("{} - {}", filter.title(), filter.description());
    let rows = screen.rows();
    if rows.is_empty() {
        println!("  No investments found");
        return;
    }
    println!(
        "  {:<12} {:<32} {:<15} {:>12} {:>12} {:>14}",
        "ID", "Name", "Type", "Price", "Holdings", "Value"
    );
    for row in rows {
        println!(
            "  {:<12} {:<32} {:<15} {:>12} {:>12} {:>14}",
            row.id.as_deref().unwrap_or("-"),
            row.name,
            row.kind,
            row.price,
            row.holdings,
            row.value
        );
    }
}

/// Print pending toasts; returns whether any of them was an error.
fn print_toasts(app: &AppState) -> bool {
    let mut failed = false;
    for toast in app.notifier.drain() {
        match toast.variant {
            ToastVariant::Destructive => {
                failed = true;
                eprintln!("{}: {}", toast.title, toast.description);
            }
            ToastVariant::Default => println!("{}: {}", toast.title, toast.description),
        }
    }
    failed
}
