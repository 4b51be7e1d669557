/*!

This is the long-form manual for `response_session` and the `pollrun` program.

## Sessions

A [Session](crate::Session) walks a participant through a fixed list of
questions. Two kinds of questions are supported:

* [BinaryQuestion](crate::BinaryQuestion): two options, answered with
  [OptionChoice](crate::OptionChoice).
* [RankingQuestion](crate::RankingQuestion): a list of options to put in order,
  answered with the list of option indices, the preferred option first.

Every answer comes with a [ConfidenceLevel](crate::ConfidenceLevel) between 1
(very uncertain) and 5 (very confident), and an optional comment. The time
between showing a question and submitting its answer is recorded.

Answering a question moves to the next one. Participants can go back to an
earlier question and answer it again: the new answer replaces the old one.
Answering the last question completes the session and takes a snapshot of the
results. A completed session only accepts `reset`.

## Running a survey

```bash
pollrun --kind ranking
```

runs the built-in ranking questions interactively. For every question, type
the answer (`1` or `2` for binary questions, a comma-separated ranking such as
`3,2,0,1` for ranking questions), then a confidence level (press enter for 3)
and an optional comment. The commands `:prev`, `:next`, `:reset` and `:quit`
are accepted instead of an answer.

With `--demographics`, three short questions about AI familiarity, usage and
trust are asked before the survey starts.

## Survey files

A custom list of questions is passed with `--config`:

```text
{
  "outputSettings": { "surveyName": "pilot study" },
  "kind": "binary",
  "questions": [
    { "id": "q1", "statement": "Pick one", "options": ["left", "right"], "correctOption": 2 }
  ]
}
```

Binary questions must have exactly two options and may set `correctOption`
(1 or 2). Ranking questions may set `correctRanking`. Both accept an
`explanation`.

## Scripts

Instead of typing the answers, a recorded list of actions can be replayed with
`--script`:

```text
{
  "startedAt": "2024-05-01T10:00:00Z",
  "demographics": { "aiExperience": "basic", "aiFrequency": "daily", "aiTrust": "neutral" },
  "actions": [
    { "action": "submit", "seconds": 4, "answer": 2, "confidence": 4, "comment": "easy" },
    { "action": "previous" },
    { "action": "next", "seconds": 1 },
    { "action": "reset" }
  ]
}
```

`seconds` is the time spent before the action. Replays are fully
deterministic when `startedAt` is given.

## Report

`--out` writes the report in JSON (`stdout` prints it). The report contains the
recorded responses and the summary shown at the end of the survey:

- `accuracy`: percentage of questions answered correctly. For ranking
  questions, only exact matches count.
- `partialCorrectness` (ranking only): average percentage of pairs of
  positions whose relative order agrees with the correct ranking.
- `confidenceWhenCorrect` and `confidenceWhenIncorrect`: average confidence
  split by correctness.
- `averageTimePerQuestion`: total time divided by the number of questions.

`--reference` compares the report with an expected one and prints the
differences.

 */
