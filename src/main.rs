/*
 * Copyright (C) 2025  Chianti GALLY
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */
mod cli;

use crate::cli::{ Cli, Command };

use clap::Parser;
use colored::Colorize;
use indicatif::{ ProgressBar, ProgressStyle };
use log::error;
use pdf_thumbnail::{ PdfThumbnail, Rejection, Result, ThumbnailResult };
use serde::Serialize;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let thumbnails = PdfThumbnail::new(cli.config());

    let ok = match &cli.command {
        Command::Generate { file, page } => respond(thumbnails.generate(file, *page)),
        Command::All { file } => respond(generate_all_with_progress(&thumbnails, file)),
        Command::Count { file } => respond(thumbnails.generate_page_count(file)),
    };

    if !ok {
        std::process::exit(1);
    }
}

/// Prints the resolved value, or the rejection, as JSON on stdout.
fn respond<T: Serialize>(result: Result<T>) -> bool {
    match result {
        Ok(value) => {
            print_json(&value);
            true
        }
        Err(e) => {
            let rejection = Rejection::from(&e);
            eprintln!("{}", format!("Error [{}]: {}", rejection.code, rejection.message).red());
            print_json(&rejection);
            false
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => error!("cannot serialize response: {e}"),
    }
}

fn generate_all_with_progress(thumbnails: &PdfThumbnail, file: &str) -> Result<Vec<ThumbnailResult>> {
    let total = thumbnails.generate_page_count(file)?.count;
    let pb = progress_bar(total);

    let result = thumbnails.generate_all_pages_with(file, |_, _| pb.inc(1));

    match &result {
        Ok(pages) => pb.finish_with_message(format!("{} page(s)", pages.len()).green().to_string()),
        Err(_) => pb.abandon(),
    }
    result
}

fn progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .map(|s| s.progress_chars("=> "));
    if let Ok(style) = style {
        pb.set_style(style);
    }
    pb
}
