use crate::reports;
use clap::Args;
use parkmap::api::HttpParkingApi;
use parkmap::config::AppConfig;
use parkmap::error::ParkResult;
use parkmap::reservations::{
    paginate, ReservationBoard, ReservationColumn, SortOrder, DEFAULT_PAGE_SIZE, LOADING_TEXT,
};

#[derive(Args, Debug, Clone)]
pub struct ReservationsArgs {
    /// name, spot, duration or start
    #[arg(long)]
    pub sort: Option<ReservationColumn>,
    #[arg(long, default_value_t = false)]
    pub desc: bool,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub per_page: usize,
}

pub async fn run(args: ReservationsArgs, config: &AppConfig) -> ParkResult<()> {
    let api = HttpParkingApi::new(&config.api)?;
    let mut board = ReservationBoard::new();

    println!("\n{}", LOADING_TEXT);
    if let Some(note) = board.load(&api).await {
        println!("⚠️  {}", note.message);
    }

    if let Some(column) = args.sort {
        let order = if args.desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        board.sort(column, order);
    }

    let page = paginate(board.rows(), args.page, args.per_page);
    reports::print_reservation_table(&page);
    Ok(())
}
