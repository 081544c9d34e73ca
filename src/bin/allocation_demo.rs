use dynopt::dynamic::{bounded_budget_max_value, sequence_alignment_cost, Campaign};

fn main() -> dynopt::Result<()> {
    let requests = [1.0, 3.0, 5.0, 7.0];
    let agents = [2.0, 4.0, 6.0, 8.0];
    match sequence_alignment_cost(&requests, &agents)? {
        Some(cost) => println!("Lowest request allocation cost: {cost}"),
        None => println!("Lowest request allocation cost: unreachable"),
    }

    let campaigns = [
        Campaign::new(3, 60.0),
        Campaign::new(2, 100.0),
        Campaign::new(4, 120.0),
        Campaign::new(1, 40.0),
    ];
    let budget = 5;
    println!(
        "Highest campaign ROI: {}",
        bounded_budget_max_value(budget, &campaigns)?
    );

    Ok(())
}
