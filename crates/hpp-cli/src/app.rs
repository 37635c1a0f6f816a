//! Command dispatch over a hydrated [`Session`].

use hpp_core::{
  editor::ItemPatch,
  history::Confirmation,
  session::Session,
  store::KeyValueStore,
};

use crate::{Command, config::CliConfig, export::write_csv, render};

/// Run one command against the session. Login and logout never reach here;
/// they only touch the store.
pub async fn run<S: KeyValueStore>(
  command: Command,
  session: &mut Session<S>,
  cfg: &CliConfig,
) -> anyhow::Result<()> {
  let margin_or_default = |m: Option<f64>| m.unwrap_or(cfg.default_margin);

  match command {
    Command::Login { .. } | Command::Logout => {}

    Command::Show { margin } => {
      let text = render::product_view(
        session.product(),
        &session.totals(),
        margin_or_default(margin),
      );
      print!("{text}");
    }

    Command::Rename { name } => {
      session.rename(name).await;
      println!("Product renamed to {:?}.", session.product().name);
    }

    Command::Yield { value } => {
      session.set_yield(value).await;
      let stored = session.product().production_yield;
      if stored <= 0.0 {
        println!("Yield set to {stored}; cost per unit shows as 0 until it is positive.");
      } else {
        println!("Yield set to {stored}.");
      }
    }

    Command::Add { category, name, price } => {
      let id = session.add_item(category).await;
      let patch = ItemPatch { name, unit_price: price };
      if !patch.is_empty() {
        session.update_item(id, &patch).await;
      }
      println!("Added {} item {id}.", category.label());
    }

    Command::Update { item, name, price } => {
      let patch = ItemPatch { name, unit_price: price };
      if patch.is_empty() {
        println!("Nothing to change; pass --name and/or --price.");
      } else if session.update_item(item, &patch).await {
        match (price, session.product().item(item)) {
          (Some(asked), Some(stored)) if stored.unit_price != asked => {
            println!("Updated item {item}; price stored as {}.", stored.unit_price)
          }
          _ => println!("Updated item {item}."),
        }
      } else {
        println!("No item {item} in the current product.");
      }
    }

    Command::Remove { item } => {
      if session.remove_item(item).await {
        println!("Removed item {item}.");
      } else {
        println!("No item {item} in the current product.");
      }
    }

    Command::New => {
      session.reset_product().await;
      println!("Started a new, empty product.");
    }

    Command::Price { margin } => {
      let text = render::price_view(session.totals().hpp_per_unit, margin_or_default(margin));
      print!("{text}");
    }

    Command::Save => {
      let record = session
        .save_to_history()
        .await
        .map_err(|e| anyhow::anyhow!("cannot save: {e}"))?;
      println!("Saved {:?} to history as {}.", record.product.name, record.id);
    }

    Command::History { query } => {
      let records = session.search(query.as_deref().unwrap_or_default());
      print!("{}", render::history_view(&records, query.as_deref()));
    }

    Command::Load { record } => match session.load_record(record).await {
      Some(product) => println!("Editing {:?} (copied from history).", product.name),
      None => println!("No saved calculation {record}."),
    },

    Command::Delete { record, yes } => {
      let confirmation = if yes { Confirmation::Confirmed } else { Confirmation::Declined };
      if session.history().get(record).is_none() {
        println!("No saved calculation {record}.");
      } else if session.delete_record(record, confirmation).await {
        println!("Deleted {record}.");
      } else {
        println!("Not deleted. This cannot be undone; pass --yes to confirm.");
      }
    }

    Command::Export { out } => match write_csv(&session.export_sheet(), &out) {
      Ok(path) => println!("Exported to {}.", path.display()),
      Err(e) => {
        tracing::warn!(error = %e, "export failed");
        eprintln!("warning: export failed, try again: {e:#}");
      }
    },

    Command::Print { margin } => {
      let totals = session.totals();
      let text = render::print_view(
        session.product(),
        &totals,
        &session.breakdown_shares(),
        margin_or_default(margin),
      );
      print!("{text}");
    }
  }

  Ok(())
}
