use std::thread;

/// Run `f` over every partition on its own worker thread and collect
/// the outputs in partition order.
///
/// Partitions share no mutable state, so the workers need no
/// synchronization; the join at the end of the scope is the only
/// barrier. A panicking worker aborts the whole operator.
pub(crate) fn for_each_partition<In, Out, F>(partitions: Vec<In>, f: F) -> Vec<Out>
where
    In: Send,
    Out: Send,
    F: Fn(In) -> Out + Send + Clone,
{
    thread::scope(|scope| {
        let handles: Vec<_> = partitions
            .into_iter()
            .enumerate()
            .map(|(index, partition)| {
                let f = f.clone();
                thread::Builder::new()
                    .name(format!("rankflow-worker-{index}"))
                    .spawn_scoped(scope, move || f(partition))
                    .expect("failed to spawn worker thread")
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker thread panicked"))
            .collect()
    })
}
