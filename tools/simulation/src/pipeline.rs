//! Static wiring of the full desk pipeline
//!
//! All subscriptions are established once, here, before any data flows.
//! Services share a single logical thread; downstream handles are
//! `Rc<RefCell<_>>` captured by the listener closures. The graph is
//! acyclic, so no listener ever re-borrows a store that is mid-notify.
//!
//! ```text
//! pricing ----> algo streaming ----> streaming.txt
//!     \-------> gui.txt
//! market data -> algo execution --> booking --> position --> risk
//!                     \--> executions.txt  \--> positions.txt \--> risk.txt
//! inquiry -----> allinquiries.txt
//! ```

use algo_engine::{AlgoExecutionService, AlgoStreamingService};
use booking::BookingService;
use history::{GuiService, HistoricalDataService};
use inquiry::InquiryService;
use market_data::MarketDataService;
use position::PositionService;
use pricing::PricingService;
use risk::RiskService;
use std::cell::RefCell;
use std::io::BufRead;
use std::path::Path;
use std::rc::Rc;
use tracing::info;
use types::errors::DeskError;
use types::execution::ExecutionOrder;
use types::inquiry::Inquiry;
use types::position::Position;
use types::quote::PriceStream;
use types::refdata::ReferenceData;
use types::risk::{BucketedSector, SectorPv01};

/// The fully wired pipeline with shared handles to every stage
pub struct Desk {
    pub refdata: ReferenceData,
    pub pricing: Rc<RefCell<PricingService>>,
    pub market_data: Rc<RefCell<MarketDataService>>,
    pub algo_execution: Rc<RefCell<AlgoExecutionService>>,
    pub algo_streaming: Rc<RefCell<AlgoStreamingService>>,
    pub booking: Rc<RefCell<BookingService>>,
    pub positions: Rc<RefCell<PositionService>>,
    pub risk: Rc<RefCell<RiskService>>,
    pub inquiries: Rc<RefCell<InquiryService>>,
    pub gui: Rc<RefCell<GuiService>>,
    pub streaming_sink: Rc<RefCell<HistoricalDataService<PriceStream>>>,
    pub execution_sink: Rc<RefCell<HistoricalDataService<ExecutionOrder>>>,
    pub position_sink: Rc<RefCell<HistoricalDataService<Position>>>,
    pub risk_sink: Rc<RefCell<HistoricalDataService<types::risk::Pv01>>>,
    pub inquiry_sink: Rc<RefCell<HistoricalDataService<Inquiry>>>,
}

impl Desk {
    /// Build every service and subscribe the whole graph, once
    pub fn build(refdata: ReferenceData, output_dir: &Path) -> Result<Self, DeskError> {
        let pricing = Rc::new(RefCell::new(PricingService::new()));
        let market_data = Rc::new(RefCell::new(MarketDataService::with_defaults()));
        let algo_execution = Rc::new(RefCell::new(AlgoExecutionService::with_defaults()));
        let algo_streaming = Rc::new(RefCell::new(AlgoStreamingService::with_defaults()));
        let booking = Rc::new(RefCell::new(BookingService::with_defaults()));
        let positions = Rc::new(RefCell::new(PositionService::new()));
        let risk = Rc::new(RefCell::new(RiskService::new(refdata.clone())));
        let inquiries = Rc::new(RefCell::new(InquiryService::with_defaults()));

        let gui = Rc::new(RefCell::new(GuiService::with_defaults(
            output_dir.join("gui.txt"),
        )?));
        let streaming_sink = Rc::new(RefCell::new(HistoricalDataService::create(
            "streaming",
            output_dir.join("streaming.txt"),
        )?));
        let execution_sink = Rc::new(RefCell::new(HistoricalDataService::create(
            "executions",
            output_dir.join("executions.txt"),
        )?));
        let position_sink = Rc::new(RefCell::new(HistoricalDataService::create(
            "positions",
            output_dir.join("positions.txt"),
        )?));
        let risk_sink = Rc::new(RefCell::new(HistoricalDataService::create(
            "risk",
            output_dir.join("risk.txt"),
        )?));
        let inquiry_sink = Rc::new(RefCell::new(HistoricalDataService::create(
            "inquiries",
            output_dir.join("allinquiries.txt"),
        )?));

        // pricing -> streaming engine
        {
            let algo_streaming = Rc::clone(&algo_streaming);
            pricing.borrow_mut().subscribe(move |price| {
                algo_streaming.borrow_mut().on_price_update(price).map(|_| ())
            });
        }
        // pricing -> gui sink
        {
            let gui = Rc::clone(&gui);
            pricing
                .borrow_mut()
                .subscribe(move |price| gui.borrow_mut().on_price(price));
        }
        // streaming engine -> streaming sink
        {
            let streaming_sink = Rc::clone(&streaming_sink);
            algo_streaming.borrow_mut().subscribe(move |stream| {
                streaming_sink
                    .borrow_mut()
                    .persist(stream.product.product_id().to_string(), stream.clone())
            });
        }
        // market data -> crossing engine
        {
            let algo_execution = Rc::clone(&algo_execution);
            market_data.borrow_mut().subscribe(move |book| {
                algo_execution.borrow_mut().on_book_update(book).map(|_| ())
            });
        }
        // crossing engine -> booking
        {
            let booking = Rc::clone(&booking);
            algo_execution
                .borrow_mut()
                .subscribe(move |order| booking.borrow_mut().on_execution(order).map(|_| ()));
        }
        // crossing engine -> execution sink
        {
            let execution_sink = Rc::clone(&execution_sink);
            algo_execution.borrow_mut().subscribe(move |order| {
                execution_sink
                    .borrow_mut()
                    .persist(order.order_id.to_string(), order.clone())
            });
        }
        // booking -> position
        {
            let positions = Rc::clone(&positions);
            booking
                .borrow_mut()
                .subscribe(move |trade| positions.borrow_mut().add_trade(trade));
        }
        // position -> risk
        {
            let risk = Rc::clone(&risk);
            positions
                .borrow_mut()
                .subscribe(move |p| risk.borrow_mut().add_position(p));
        }
        // position -> position sink
        {
            let position_sink = Rc::clone(&position_sink);
            positions.borrow_mut().subscribe(move |p| {
                position_sink
                    .borrow_mut()
                    .persist(p.product.product_id().to_string(), p.clone())
            });
        }
        // risk -> risk sink
        {
            let risk_sink = Rc::clone(&risk_sink);
            risk.borrow_mut().subscribe(move |r| {
                risk_sink
                    .borrow_mut()
                    .persist(r.product.product_id().to_string(), r.clone())
            });
        }
        // inquiry -> inquiry sink
        {
            let inquiry_sink = Rc::clone(&inquiry_sink);
            inquiries.borrow_mut().subscribe(move |i| {
                inquiry_sink
                    .borrow_mut()
                    .persist(i.inquiry_id.clone(), i.clone())
            });
        }

        info!("pipeline wired");
        Ok(Self {
            refdata,
            pricing,
            market_data,
            algo_execution,
            algo_streaming,
            booking,
            positions,
            risk,
            inquiries,
            gui,
            streaming_sink,
            execution_sink,
            position_sink,
            risk_sink,
            inquiry_sink,
        })
    }

    /// Drive the price feed through the graph
    pub fn ingest_prices<R: BufRead>(&self, reader: R) -> Result<u64, DeskError> {
        pricing::ingest_prices(reader, &self.refdata, &mut self.pricing.borrow_mut())
    }

    /// Drive the trade feed through the graph
    pub fn ingest_trades<R: BufRead>(&self, reader: R) -> Result<u64, DeskError> {
        booking::ingest_trades(reader, &self.refdata, &mut self.booking.borrow_mut())
    }

    /// Drive the depth feed through the graph
    pub fn ingest_market_data<R: BufRead>(&self, reader: R) -> Result<u64, DeskError> {
        market_data::ingest_market_data(reader, &self.refdata, &mut self.market_data.borrow_mut())
    }

    /// Drive the inquiry feed through the graph
    pub fn ingest_inquiries<R: BufRead>(&self, reader: R) -> Result<u64, DeskError> {
        inquiry::ingest_inquiries(reader, &self.refdata, &mut self.inquiries.borrow_mut())
    }

    /// Bucketed sector risk over the current risk store
    pub fn bucketed_risk(&self, sector: &BucketedSector) -> SectorPv01 {
        self.risk.borrow().bucketed_risk(sector)
    }
}
