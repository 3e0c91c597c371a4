use criterion::{Criterion, criterion_group, criterion_main};
use dispatch::{
    DeliveryAssigner, DeliveryBag, DeliveryWorker, DispatchConfig, Filter, InMemoryStore,
    NearestToFullFilter, Order, OrderType, WorkerStore,
};

fn make_workers(count: u32) -> Vec<DeliveryWorker> {
    (0..count)
        .map(|i| {
            let mut bag = DeliveryBag::default();
            bag.load(i % 3);
            DeliveryWorker::new(format!("worker-{i:04}"))
                .with_bag(bag)
                .with_delivered_count(i % 7)
        })
        .collect()
}

fn bench_filter_chain(c: &mut Criterion) {
    let chain = NearestToFullFilter::new();
    let order = Order::new("jperez", OrderType::Individual, &DispatchConfig::default());
    let workers = make_workers(100);

    c.bench_function("dispatch/filter_chain_100_workers", |b| {
        b.iter(|| chain.filter(workers.clone(), &order));
    });
}

fn bench_filter_chain_1000(c: &mut Criterion) {
    let chain = NearestToFullFilter::new();
    let order = Order::new("jperez", OrderType::Individual, &DispatchConfig::default());
    let workers = make_workers(1000);

    c.bench_function("dispatch/filter_chain_1000_workers", |b| {
        b.iter(|| chain.filter(workers.clone(), &order));
    });
}

fn bench_assign_to(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = DispatchConfig::default();

    c.bench_function("dispatch/assign_to_50_workers", |b| {
        b.iter(|| {
            rt.block_on(async {
                let store = InMemoryStore::new();
                for worker in make_workers(50) {
                    store.register_worker(worker.username().clone()).await.unwrap();
                    store
                        .save_bag(worker.username(), *worker.bag())
                        .await
                        .unwrap();
                }
                let assigner = DeliveryAssigner::new(store);
                let mut order = Order::new("jperez", OrderType::Individual, &config);
                assigner.assign_to(&mut order).await.unwrap();
            });
        });
    });
}

criterion_group!(
    benches,
    bench_filter_chain,
    bench_filter_chain_1000,
    bench_assign_to,
);
criterion_main!(benches);
