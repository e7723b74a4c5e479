use zins::analysis;
use zins::catalog;
use zins::scenarios;

fn main() {
    // Products as NDJSON to stdout.
    for product in catalog::list_products() {
        println!("{}", serde_json::to_string(product).expect("serialisation failed"));
    }

    // Incident table.
    eprintln!("incidents:");
    for s in scenarios::list_scenarios() {
        eprintln!(
            "  {:<11}  p={:.2}  cover={:?}",
            format!("{:?}", s.kind),
            s.selection_weight,
            s.category
        );
    }

    // Per-product expectation per wave.
    eprintln!("expected value per wave:");
    for e in analysis::product_economics() {
        eprintln!(
            "  {:<32}  premium={:>5}  E[claim]={:>7.1}  E[uninsured]={:>7.1}  E[net]={:>8.1}  E[hp saved]={:>5.2}",
            e.name,
            e.premium,
            e.expected_claim,
            e.expected_uninsured_loss,
            e.expected_net_saving,
            e.expected_health_saved,
        );
    }
}
